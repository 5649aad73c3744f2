//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod error;
pub mod http;

pub use error::ApiError;

/// Build the application router with:
/// - worksheet, pattern and preset API under `/api/v1/...`
/// - the print front-end from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/worksheet", post(http::http_post_worksheet))
    .route("/api/v1/worksheet/mixed", post(http::http_post_mixed_worksheet))
    .route("/api/v1/settings/validate", post(http::http_post_validate))
    .route("/api/v1/patterns", get(http::http_get_patterns))
    .route("/api/v1/patterns/:key", get(http::http_get_pattern))
    .route("/api/v1/presets", get(http::http_get_presets))
    .route("/api/v1/presets/:name", get(http::http_get_preset))
    .route("/api/v1/solve", post(http::http_post_solve))
    .with_state(state)
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .fallback_service(static_service)
}
