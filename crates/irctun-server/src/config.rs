//! Gateway configuration.

use std::time::Duration;

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:6667";
/// Default upstream IRC server.
pub const DEFAULT_UPSTREAM: &str = "irc.supernets.org:6667";
/// Channel joined after registration.
pub const DEFAULT_CHANNEL: &str = "#superbowl";

/// Runtime configuration shared by every session.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to accept telnet clients on.
    pub listen: String,
    /// IRC server to dial for each client.
    pub upstream: String,
    /// Channel joined once registration completes.
    pub channel: String,
    /// Client silence that ends a session.
    pub idle_timeout: Duration,
    /// Bound on each write to either socket.
    pub write_timeout: Duration,
    /// Bound on dialing the IRC server.
    pub connect_timeout: Duration,
    /// How long to wait for a size report before falling back to the splash.
    pub probe_timeout: Duration,
    /// Pause after an in-band connect failure so the user can read it.
    pub failure_grace: Duration,
    /// Pause after `/quit` so the goodbye frame reaches the client.
    pub quit_grace: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            upstream: DEFAULT_UPSTREAM.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            idle_timeout: Duration::from_secs(300),
            write_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_millis(500),
            failure_grace: Duration::from_secs(3),
            quit_grace: Duration::from_millis(300),
        }
    }
}
