//!
//! Filesystem Gateway binary
//! -------------------------
//! Serves only the filesystem routes. Configuration comes from CLI flags with
//! environment fallbacks (`HOSTBRIDGE_FS_ADDR`, `HOSTBRIDGE_CORS_ORIGINS`).

use clap::Parser;
use hostbridge::config::FsCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hostbridge::init_tracing();
    let config = FsCli::parse().config();
    tracing::info!(target: "startup", "Using bind={}, cors={:?}", config.bind, config.cors);
    println!("File system helper running on http://{}", config.bind);
    hostbridge::fs_gateway::run(config).await
}
