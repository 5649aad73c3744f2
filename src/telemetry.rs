//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL controls the filter (e.g. "debug" or directives like
//!   "info,worksheet=debug,generator=warn,pattern=debug").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets used by the engine: `worksheet` (orchestration and server),
//! `generator` (samplers and batches), `pattern` (pattern dispatch).

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,worksheet=debug,generator=info,tower_http=info,axum=info";

pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  // Choose JSON vs pretty; the two builders have different types.
  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    _ => builder.init(),
  }
}
