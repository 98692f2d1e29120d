//! Router plumbing shared by both gateways: CORS, tracing, JSON responses,
//! blocking offload and the listener lifecycle.

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::CorsPolicy;
use crate::error::GatewayResult;

/// Build the CORS layer for a gateway. Only the listed request headers are
/// allowed through a preflight.
pub fn cors_layer(policy: &CorsPolicy, allow_headers: Vec<HeaderName>) -> CorsLayer {
    let origin = match policy {
        CorsPolicy::Any => AllowOrigin::from(Any),
        CorsPolicy::Origins(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(target: "startup", origin = %o, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(allow_headers)
}

/// Attach the common layers to a gateway router.
pub fn with_layers(router: Router, policy: &CorsPolicy, allow_headers: Vec<HeaderName>) -> Router {
    router
        .layer(cors_layer(policy, allow_headers))
        .layer(TraceLayer::new_for_http())
}

pub fn json_response(status: u16, body: Value) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(body)).into_response()
}

/// Answer for a bare OPTIONS request that the CORS layer did not intercept.
pub async fn preflight() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]).into_response()
}

/// Run a blocking OS call on the blocking pool. The request waits for it to
/// finish; there is no timeout and no cancellation.
pub async fn run_blocking<T, F>(f: F) -> GatewayResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> GatewayResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

pub async fn bind(addr: SocketAddr, name: &str) -> anyhow::Result<TcpListener> {
    if !addr.ip().is_loopback() {
        warn!(target: "startup", "{} bound to non-loopback address {}; any host on that network can call it", name, addr);
    }
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {} on {}", name, addr))
}

/// Serve `app` on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router, name: &str) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(target: "startup", "{} running on http://{}", name, addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("{} server error", name))?;
    info!(target: "startup", "{} stopped", name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(target: "startup", "failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
