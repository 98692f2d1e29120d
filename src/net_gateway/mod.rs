//!
//! Network Gateway
//! ---------------
//! Loopback HTTP facade over the host's wireless adapter.
//!
//! Routes:
//! - `GET  /networks`   -> `[{ssid, signal, secured}]`
//! - `GET  /current`    -> `{ssid}` (`null` when not associated)
//! - `POST /join`       `{ssid, password}` -> `{ok: true}`
//! - `POST /disconnect` -> `{ok: true}`
//!
//! Failures answer `{error}` with the status from `GatewayError::http_status`.
//! The platform backend is picked once when the router is built.

pub mod backend;
pub mod command;
pub mod parse;
pub mod platform;
#[doc(hidden)]
pub mod testing;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::NetConfig;
use crate::error::GatewayError;
use crate::http::{self, json_response, run_blocking};
use backend::{backend_for, WirelessBackend};
use command::{CommandRunner, SystemRunner};

pub use parse::NetworkRecord;
pub use platform::Platform;

pub const NAME: &str = "Network gateway";

#[derive(Clone)]
pub struct NetState {
    pub backend: Arc<dyn WirelessBackend>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JoinPayload {
    ssid: Option<String>,
    password: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        warn!(target: "net_gateway", code = self.code_str(), "{}", self);
        json_response(self.http_status(), json!({ "error": self.message() }))
    }
}

/// Router spawning real processes through [`SystemRunner`].
pub fn router(config: &NetConfig) -> Router {
    router_with_runner(config, Arc::new(SystemRunner))
}

/// Router whose backend runs commands through `runner`.
pub fn router_with_runner(config: &NetConfig, runner: Arc<dyn CommandRunner>) -> Router {
    let backend = backend_for(&config.platform, runner, config.wifi_device.clone());
    info!(target: "net_gateway", platform = %config.platform, "wireless backend selected");
    let routes = Router::new()
        .route("/networks", get(networks).options(http::preflight))
        .route("/current", get(current).options(http::preflight))
        .route("/join", post(join).options(http::preflight))
        .route("/disconnect", post(disconnect).options(http::preflight))
        .fallback(fallback)
        .with_state(NetState { backend });
    http::with_layers(routes, &config.gateway.cors, vec![header::CONTENT_TYPE])
}

pub async fn run(config: NetConfig) -> anyhow::Result<()> {
    let listener = http::bind(config.gateway.bind, NAME).await?;
    http::serve(listener, router(&config), NAME).await
}

async fn networks(State(state): State<NetState>) -> Response {
    let be = state.backend.clone();
    match run_blocking(move || be.scan()).await {
        Ok(nets) => Json(nets).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn current(State(state): State<NetState>) -> Response {
    let be = state.backend.clone();
    match run_blocking(move || be.current()).await {
        Ok(ssid) => Json(json!({ "ssid": ssid })).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn join(State(state): State<NetState>, body: Bytes) -> Response {
    // Unreadable bodies count as `{}` and fail the ssid check below.
    let payload: JoinPayload = serde_json::from_slice(&body).unwrap_or_default();
    let Some(ssid) = payload.ssid.filter(|s| !s.is_empty()) else {
        return GatewayError::validation("ssid required").into_response();
    };
    let password = payload.password.unwrap_or_default();
    let be = state.backend.clone();
    match run_blocking(move || be.join(&ssid, &password)).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn disconnect(State(state): State<NetState>) -> Response {
    let be = state.backend.clone();
    match run_blocking(move || be.disconnect()).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return http::preflight().await;
    }
    GatewayError::NotFound.into_response()
}
