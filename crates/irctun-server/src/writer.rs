//! Serialized, time-bounded socket writes.

use std::time::Duration;

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
    time::timeout,
};

use crate::GatewayError;

/// One write path to a socket.
///
/// Writers queue on the internal lock, so frames are never interleaved, and
/// each write is bounded by its own timeout. A stalled peer therefore only
/// blocks callers writing to that same peer.
#[derive(Debug)]
pub struct TimedWriter<W> {
    inner: Mutex<W>,
    timeout: Duration,
    op: &'static str,
}

impl<W: AsyncWrite + Unpin + Send> TimedWriter<W> {
    /// Wrap `inner`; `op` names the path in timeout errors.
    pub fn new(inner: W, timeout: Duration, op: &'static str) -> Self {
        Self { inner: Mutex::new(inner), timeout, op }
    }

    /// Write and flush all of `bytes`.
    pub async fn write_all(&self, bytes: &[u8]) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().await;
        timeout(self.timeout, async {
            inner.write_all(bytes).await?;
            inner.flush().await
        })
        .await
        .map_err(|_| GatewayError::Timeout { op: self.op })??;
        Ok(())
    }

    /// Close the write direction, ignoring failures.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        if let Ok(Err(e)) = timeout(self.timeout, inner.shutdown()).await {
            tracing::debug!("{} shutdown failed: {e}", self.op);
        }
    }
}
