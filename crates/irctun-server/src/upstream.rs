//! IRC server connection.

use std::time::Duration;

use bytes::BytesMut;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    net::TcpStream,
    time::timeout,
};

use crate::GatewayError;

/// Longest accepted server line, terminator included.
pub const MAX_UPSTREAM_LINE: usize = 4096;

/// Dial the IRC server within `limit`.
pub async fn connect(addr: &str, limit: Duration) -> Result<TcpStream, GatewayError> {
    let stream = timeout(limit, TcpStream::connect(addr))
        .await
        .map_err(|_| GatewayError::Timeout { op: "upstream connect" })?
        .map_err(|source| GatewayError::Connect { addr: addr.to_string(), source })?;
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("set_nodelay failed: {e}");
    }
    Ok(stream)
}

/// Splits the server byte stream into lines.
///
/// Lines longer than [`MAX_UPSTREAM_LINE`] are dropped whole. Invalid UTF-8
/// is replaced rather than rejected.
#[derive(Debug)]
pub struct UpstreamReader<R> {
    inner: R,
    buf: BytesMut,
    discarding: bool,
}

impl<R: AsyncRead + Unpin> UpstreamReader<R> {
    /// Wrap the read half of the server connection.
    pub fn new(inner: R) -> Self {
        Self { inner, buf: BytesMut::with_capacity(MAX_UPSTREAM_LINE), discarding: false }
    }

    /// Next line without its `\r\n`. Cancel safe.
    pub async fn next_line(&mut self) -> Result<String, GatewayError> {
        loop {
            if let Some(pos) = memchr::memchr(b'\n', &self.buf) {
                let raw = self.buf.split_to(pos + 1);
                if std::mem::take(&mut self.discarding) {
                    continue;
                }
                if raw.len() > MAX_UPSTREAM_LINE {
                    tracing::warn!(len = raw.len(), "discarding over-long server line");
                    continue;
                }
                let line = String::from_utf8_lossy(&raw[..pos]);
                return Ok(line.trim_end_matches('\r').to_string());
            }

            if self.buf.len() >= MAX_UPSTREAM_LINE {
                tracing::warn!(len = self.buf.len(), "discarding over-long server line");
                self.buf.clear();
                self.discarding = true;
            }

            if self.inner.read_buf(&mut self.buf).await? == 0 {
                return Err(GatewayError::UpstreamClosed);
            }
        }
    }
}
