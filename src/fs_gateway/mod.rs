//!
//! Filesystem Gateway
//! ------------------
//! Loopback HTTP facade over the host filesystem.
//!
//! Routes:
//! - `GET  /list`   header `Dir` (default `.`)      -> `items`
//! - `GET  /read`   header `Path`                   -> `content`
//! - `POST /write`  `{path, content, binary}`       -> `result`
//! - `POST /mkdir`  `{path}`                        -> `result`
//! - `POST /delete` `{path, recursive}`             -> `result`
//!
//! Every response is an `Envelope`; failures carry one ERROR record holding the
//! native error text and the path exactly as the client sent it.

pub mod ops;
pub mod paths;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, Method};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::envelope::{Envelope, PayloadField};
use crate::error::{GatewayError, GatewayResult};
use crate::http::{self, json_response, run_blocking};

pub const NAME: &str = "Filesystem gateway";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WritePayload {
    path: Option<String>,
    content: String,
    binary: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathPayload {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeletePayload {
    path: Option<String>,
    recursive: bool,
}

/// Router with CORS and tracing layers for the given framing.
pub fn router(config: &GatewayConfig) -> Router {
    let routes = Router::new()
        .route("/list", get(list_handler).options(http::preflight))
        .route("/read", get(read_handler).options(http::preflight))
        .route("/write", post(write_handler).options(http::preflight))
        .route("/mkdir", post(mkdir_handler).options(http::preflight))
        .route("/delete", post(delete_handler).options(http::preflight))
        // Wrong method on a known path is an unknown route, not a bare 405.
        .method_not_allowed_fallback(fallback)
        .fallback(fallback);
    let allow_headers = vec![
        header::CONTENT_TYPE,
        HeaderName::from_static("dir"),
        HeaderName::from_static("path"),
    ];
    http::with_layers(routes, &config.cors, allow_headers)
}

/// Bind and serve until Ctrl-C.
pub async fn run(config: GatewayConfig) -> anyhow::Result<()> {
    let listener = http::bind(config.bind, NAME).await?;
    http::serve(listener, router(&config), NAME).await
}

/// The one place where operation results become HTTP responses.
fn respond(route: &str, field: PayloadField, request_path: &str, result: GatewayResult<Vec<String>>) -> Response {
    match result {
        Ok(items) => {
            debug!(target: "fs_gateway", route, path = request_path, count = items.len(), "ok");
            json_response(200, Envelope::success(field, &items).to_json())
        }
        Err(err) => {
            warn!(target: "fs_gateway", route, path = request_path, code = err.code_str(), "{}", err);
            json_response(err.http_status(), Envelope::failure(field, &err, request_path).to_json())
        }
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(|s| s.to_string())
}

/// A missing or malformed body is treated as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

fn require_path(path: Option<String>) -> GatewayResult<String> {
    match path {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(GatewayError::validation("path required")),
    }
}

async fn list_handler(headers: HeaderMap) -> Response {
    let dir = header_str(&headers, "dir").unwrap_or_else(|| ".".to_string());
    let target = dir.clone();
    let result = run_blocking(move || {
        ops::list(&target).map(|recs| recs.iter().map(|r| r.to_string()).collect())
    })
    .await;
    respond("/list", PayloadField::Items, &dir, result)
}

async fn read_handler(headers: HeaderMap) -> Response {
    let Some(path) = header_str(&headers, "path").filter(|p| !p.is_empty()) else {
        return respond("/read", PayloadField::Content, "", Err(GatewayError::validation("Path header required")));
    };
    let target = path.clone();
    let result = run_blocking(move || ops::read(&target)).await;
    respond("/read", PayloadField::Content, &path, result)
}

async fn write_handler(body: Bytes) -> Response {
    let payload: WritePayload = parse_body(&body);
    let path = match require_path(payload.path) {
        Ok(p) => p,
        Err(e) => return respond("/write", PayloadField::Result, "", Err(e)),
    };
    let target = path.clone();
    let result = run_blocking(move || {
        ops::write(&target, &payload.content, payload.binary).map(|r| vec![r.to_string()])
    })
    .await;
    respond("/write", PayloadField::Result, &path, result)
}

async fn mkdir_handler(body: Bytes) -> Response {
    let payload: PathPayload = parse_body(&body);
    let path = match require_path(payload.path) {
        Ok(p) => p,
        Err(e) => return respond("/mkdir", PayloadField::Result, "", Err(e)),
    };
    let target = path.clone();
    let result = run_blocking(move || ops::mkdir(&target).map(|r| vec![r.to_string()])).await;
    respond("/mkdir", PayloadField::Result, &path, result)
}

async fn delete_handler(body: Bytes) -> Response {
    let payload: DeletePayload = parse_body(&body);
    let path = match require_path(payload.path) {
        Ok(p) => p,
        Err(e) => return respond("/delete", PayloadField::Result, "", Err(e)),
    };
    let target = path.clone();
    let recursive = payload.recursive;
    let result = run_blocking(move || ops::delete(&target, recursive).map(|r| vec![r.to_string()])).await;
    respond("/delete", PayloadField::Result, &path, result)
}

async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return http::preflight().await;
    }
    let field = if method == Method::GET { PayloadField::Items } else { PayloadField::Result };
    respond("fallback", field, "", Err(GatewayError::NotFound))
}
