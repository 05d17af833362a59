//! IRC tunnel binary.
//!
//! # Usage
//!
//! ```bash
//! irctun --listen 0.0.0.0:6667 --upstream irc.libera.chat:6667 --channel '#rust'
//! telnet localhost 6667
//! ```

use clap::Parser;
use irctun_server::{DEFAULT_CHANNEL, DEFAULT_LISTEN, DEFAULT_UPSTREAM, Gateway, GatewayConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Telnet-to-IRC gateway
#[derive(Parser, Debug)]
#[command(name = "irctun")]
#[command(about = "Full-screen IRC for plain telnet clients")]
#[command(version)]
struct Args {
    /// Address to accept telnet clients on
    #[arg(short, long, default_value = DEFAULT_LISTEN)]
    listen: String,

    /// IRC server to connect each client to
    #[arg(short, long, default_value = DEFAULT_UPSTREAM)]
    upstream: String,

    /// Channel to join after registration
    #[arg(short, long, default_value = DEFAULT_CHANNEL)]
    channel: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = GatewayConfig {
        listen: args.listen,
        upstream: args.upstream,
        channel: args.channel,
        ..GatewayConfig::default()
    };

    let gateway = Gateway::bind(config).await?;
    tracing::info!("irctun listening on {}", gateway.local_addr()?);

    gateway.run().await?;

    Ok(())
}
