//! hostbridge: loopback HTTP gateways that give a browser-extension client
//! access to the local filesystem and the wireless adapter.
//!
//! Two independent, stateless services share one request/response contract:
//! - [`fs_gateway`] lists, reads, writes, creates and deletes host paths and
//!   answers with base64(JSON) encoded record sequences ([`envelope`]).
//! - [`net_gateway`] scans, inspects, joins and leaves wireless networks by
//!   driving the platform's own tooling through one backend per OS family.

pub mod config;
pub mod envelope;
pub mod error;
pub mod fs_gateway;
pub mod http;
pub mod net_gateway;

/// Install the `tracing` subscriber used by every binary. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
