//!
//! Network Gateway binary
//! ----------------------
//! Serves only the wireless routes. The platform backend is detected at
//! startup unless `--platform` / `HOSTBRIDGE_PLATFORM` overrides it.

use clap::Parser;
use hostbridge::config::NetCli;
use hostbridge::net_gateway::Platform;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hostbridge::init_tracing();
    let config = NetCli::parse().config();
    if let Platform::Unsupported(name) = &config.platform {
        tracing::warn!(target: "startup", "no wireless backend for '{}'; every route will answer Unsupported OS", name);
    }
    tracing::info!(
        target: "startup",
        "Using bind={}, platform={}, wifi_device={:?}",
        config.gateway.bind, config.platform, config.wifi_device
    );
    println!("Starting WiFi helper on http://{} - Ctrl+C to stop", config.gateway.bind);
    hostbridge::net_gateway::run(config).await
}
