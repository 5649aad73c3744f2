//! Sansu worksheet server
//!
//! - Axum HTTP API over the worksheet engine
//! - Static print front-end fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   WORKSHEET_CONFIG_PATH : path to TOML config (language, defaults, presets)
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use sansu_worksheets::routes::build_router;
use sansu_worksheets::state::AppState;
use sansu_worksheets::telemetry;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: the worksheet config (language, defaults, presets).
  let state = Arc::new(AppState::new());

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "worksheet", %addr, presets = state.config.presets.len(), "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
