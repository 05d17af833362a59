//! Client socket reader.

use std::time::Duration;

use irctun_proto::{Decoded, TelnetDecoder};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    time::timeout,
};

use crate::GatewayError;

const READ_CHUNK: usize = 4096;

/// Reads raw client bytes and yields decoded resizes and lines.
///
/// Cancel safe: bytes are only fed to the decoder after a read completes.
#[derive(Debug)]
pub struct ClientReader<R> {
    inner: R,
    decoder: TelnetDecoder,
    buf: Vec<u8>,
    idle: Duration,
}

impl<R: AsyncRead + Unpin> ClientReader<R> {
    /// Wrap the read half of a client connection.
    pub fn new(inner: R, idle: Duration) -> Self {
        Self { inner, decoder: TelnetDecoder::new(), buf: vec![0; READ_CHUNK], idle }
    }

    /// Next decoded item, reading as needed.
    ///
    /// Fails with [`GatewayError::Timeout`] if the client stays silent for
    /// the idle timeout and with [`GatewayError::ClientClosed`] on EOF.
    pub async fn next(&mut self) -> Result<Decoded, GatewayError> {
        loop {
            if let Some(item) = self.decoder.next_item() {
                return Ok(item);
            }

            let n = timeout(self.idle, self.inner.read(&mut self.buf))
                .await
                .map_err(|_| GatewayError::Timeout { op: "client read" })??;
            if n == 0 {
                return Err(GatewayError::ClientClosed);
            }
            tracing::trace!(bytes = n, pending = self.decoder.pending_len(), "client read");
            self.decoder.feed(&self.buf[..n]);
        }
    }
}
