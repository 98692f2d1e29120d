//!
//! hostbridge binary
//! -----------------
//! Runs the Filesystem and Network gateways side by side. Either gateway
//! stopping with an error stops the process.

use clap::Parser;
use tracing::info;

use hostbridge::config::Cli;
use hostbridge::{fs_gateway, net_gateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hostbridge::init_tracing();
    let cli = Cli::parse();
    let fs = cli.fs_config();
    let net = cli.net_config();

    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "startup",
        "hostbridge starting: RUST_LOG='{}', fs_addr={}, net_addr={}, platform={}, cors={:?}",
        rust_log, fs.bind, net.gateway.bind, net.platform, fs.cors
    );

    tokio::try_join!(fs_gateway::run(fs), net_gateway::run(net))?;
    Ok(())
}
