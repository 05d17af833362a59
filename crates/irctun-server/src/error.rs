//! Gateway error types.

use std::io;

use thiserror::Error;

/// Errors that end a session or stop the gateway.
///
/// Every variant is terminal for the session it occurs in. Other sessions
/// are unaffected.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Socket read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bounded operation did not finish in time.
    #[error("{op} timed out")]
    Timeout {
        /// Operation that timed out.
        op: &'static str,
    },

    /// Dialing the IRC server failed.
    #[error("cannot reach {addr}: {source}")]
    Connect {
        /// Address that was dialed.
        addr: String,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// The client hung up.
    #[error("client closed the connection")]
    ClientClosed,

    /// The IRC server hung up.
    #[error("IRC server closed the connection")]
    UpstreamClosed,
}
