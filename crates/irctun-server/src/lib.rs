//! IRC tunnel gateway.
//!
//! Accepts raw TCP / telnet clients and gives each one a full-screen IRC
//! client rendered server-side, backed by its own connection to an upstream
//! IRC server.
//!
//! # Architecture
//!
//! This crate is the production glue around [`irctun_app`]'s pure state
//! machine: it owns the sockets, timers and tasks, feeds decoded input into
//! the [`irctun_app::App`], and writes the frames [`irctun_tui`] renders.
//!
//! # Components
//!
//! - [`Gateway`]: listener and accept loop
//! - [`Session`]: per-connection coordinator (two loops, one lock)
//! - [`TimedWriter`]: serialized, time-bounded write path per socket
//! - [`SystemEnv`]: production environment (system clock, OS RNG)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod config;
mod error;
mod session;
mod system_env;
mod upstream;
mod writer;

use std::{net::SocketAddr, sync::Arc};

pub use client::ClientReader;
pub use config::{DEFAULT_CHANNEL, DEFAULT_LISTEN, DEFAULT_UPSTREAM, GatewayConfig};
pub use error::GatewayError;
pub use session::Session;
pub use system_env::SystemEnv;
use tokio::net::TcpListener;
use tracing::Instrument;
pub use upstream::{MAX_UPSTREAM_LINE, UpstreamReader, connect};
pub use writer::TimedWriter;

/// Listening gateway.
pub struct Gateway {
    listener: TcpListener,
    config: Arc<GatewayConfig>,
}

impl Gateway {
    /// Bind the listen address from `config`.
    pub async fn bind(config: GatewayConfig) -> Result<Self, GatewayError> {
        let listener = TcpListener::bind(&config.listen).await?;
        Ok(Self { listener, config: Arc::new(config) })
    }

    /// Local address the gateway is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, GatewayError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients forever, one task per session.
    pub async fn run(self) -> Result<(), GatewayError> {
        tracing::info!(
            upstream = %self.config.upstream,
            channel = %self.config.channel,
            "gateway listening on {}",
            self.listener.local_addr()?
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!("set_nodelay failed: {e}");
                    }
                    let session = Session::new(stream, Arc::clone(&self.config), SystemEnv::new());
                    let span = tracing::info_span!("session", %peer);
                    tokio::spawn(
                        async move {
                            tracing::info!("accepted");
                            match session.run().await {
                                Ok(()) => tracing::info!("closed"),
                                Err(e) => tracing::info!("closed: {e}"),
                            }
                        }
                        .instrument(span),
                    );
                },
                Err(e) => {
                    tracing::error!("accept error: {e}");
                },
            }
        }
    }
}
