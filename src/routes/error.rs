//! API error type and its JSON rendering.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;

use crate::error::EngineError;

#[derive(Debug)]
pub enum ApiError {
  NotFound(String),
  /// Settings failed `validate_settings`; carries every message.
  InvalidSettings(Vec<String>),
  Engine(EngineError),
}

#[derive(Serialize)]
struct ErrorResponse {
  error: &'static str,
  message: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  errors: Vec<String>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error, message, errors) = match self {
      ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, Vec::new()),
      ApiError::InvalidSettings(errors) => {
        (StatusCode::BAD_REQUEST, "invalid_settings", "worksheet settings are out of range".to_string(), errors)
      }
      ApiError::Engine(e @ EngineError::PatternNotImplemented(_)) => {
        (StatusCode::NOT_FOUND, "pattern_not_found", e.to_string(), Vec::new())
      }
      ApiError::Engine(e @ EngineError::Config { .. }) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "config_error", e.to_string(), Vec::new())
      }
      ApiError::Engine(e) => (StatusCode::BAD_REQUEST, "generation_error", e.to_string(), Vec::new()),
    };
    (status, Json(ErrorResponse { error, message, errors })).into_response()
  }
}

impl From<EngineError> for ApiError {
  fn from(err: EngineError) -> Self {
    ApiError::Engine(err)
  }
}

impl std::fmt::Display for ApiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
      ApiError::InvalidSettings(errors) => write!(f, "Invalid settings: {}", errors.join("; ")),
      ApiError::Engine(e) => write!(f, "Engine error: {e}"),
    }
  }
}

impl std::error::Error for ApiError {}
