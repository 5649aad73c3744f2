//! HTTP endpoint handlers. These are thin wrappers that forward to the engine.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::error::ApiError;
use crate::config::Preset;
use crate::domain::WorksheetSettings;
use crate::missing::solve_missing;
use crate::patterns::{all_patterns, category_config, generate_pattern_problems, patterns_for_grade, CalculationPattern};
use crate::protocol::*;
use crate::state::{request_rng, AppState};
use crate::worksheet::{generate_mixed_problems, generate_problems, validate_settings, ValidationResult};

/// Default batch size for the pattern preview endpoint.
const PREVIEW_COUNT: usize = 10;

fn ensure_valid(settings: &WorksheetSettings) -> Result<(), ApiError> {
  let ValidationResult { valid, errors } = validate_settings(settings);
  if valid { Ok(()) } else { Err(ApiError::InvalidSettings(errors)) }
}

fn worksheet_out(settings: &WorksheetSettings, problems: Vec<crate::domain::Problem>) -> WorksheetOut {
  WorksheetOut { id: Uuid::new_v4().to_string(), layout_columns: settings.layout_columns, problems }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(body), fields(grade = body.settings.grade, problem_type = %body.settings.problem_type, seed = ?body.seed))]
pub async fn http_post_worksheet(Json(body): Json<WorksheetIn>) -> Result<Json<WorksheetOut>, ApiError> {
  ensure_valid(&body.settings)?;
  let mut rng = request_rng(body.seed);
  let problems = generate_problems(&mut rng, &body.settings)?;
  info!(target: "worksheet", count = problems.len(), "HTTP worksheet served");
  Ok(Json(worksheet_out(&body.settings, problems)))
}

#[instrument(level = "info", skip(body), fields(grade = body.settings.grade, operations = body.operations.len(), seed = ?body.seed))]
pub async fn http_post_mixed_worksheet(Json(body): Json<MixedWorksheetIn>) -> Result<Json<WorksheetOut>, ApiError> {
  ensure_valid(&body.settings)?;
  let mut rng = request_rng(body.seed);
  let problems = generate_mixed_problems(&mut rng, &body.settings, &body.operations)?;
  info!(target: "worksheet", count = problems.len(), "HTTP mixed worksheet served");
  Ok(Json(worksheet_out(&body.settings, problems)))
}

#[instrument(level = "info", skip(settings))]
pub async fn http_post_validate(Json(settings): Json<WorksheetSettings>) -> impl IntoResponse {
  Json(validate_settings(&settings))
}

#[instrument(level = "info")]
pub async fn http_get_patterns(Query(q): Query<PatternListQuery>) -> impl IntoResponse {
  let patterns = match q.grade {
    Some(grade) => patterns_for_grade(grade),
    None => all_patterns(),
  };
  Json(PatternListOut { patterns, categories: category_config() })
}

#[instrument(level = "info")]
pub async fn http_get_pattern(
  Path(key): Path<String>,
  Query(q): Query<PatternQuery>,
) -> Result<Json<PatternOut>, ApiError> {
  let pattern: CalculationPattern = key.parse()?;
  let count = q.count.unwrap_or(PREVIEW_COUNT).clamp(1, crate::worksheet::MAX_PROBLEM_COUNT);
  let mut rng = request_rng(q.seed);
  let problems = generate_pattern_problems(&mut rng, pattern, count)?;
  info!(target: "pattern", %key, count = problems.len(), "HTTP pattern preview served");
  Ok(Json(PatternOut { pattern: pattern.info(), problems }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_presets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.config.presets.clone())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_preset(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
  Query(q): Query<PresetQuery>,
) -> Result<Json<WorksheetOut>, ApiError> {
  let Preset { settings, .. } =
    state.config.preset(&name).cloned().ok_or_else(|| ApiError::NotFound(format!("preset '{name}'")))?;
  ensure_valid(&settings)?;
  let mut rng = request_rng(q.seed);
  let problems = generate_problems(&mut rng, &settings)?;
  info!(target: "worksheet", %name, count = problems.len(), "HTTP preset worksheet served");
  Ok(Json(worksheet_out(&settings, problems)))
}

#[instrument(level = "info", skip(state, body), fields(op = %body.problem.operation))]
pub async fn http_post_solve(State(state): State<Arc<AppState>>, Json(body): Json<SolveIn>) -> impl IntoResponse {
  let answer = solve_missing(&body.problem, state.config.language);
  Json(SolveOut { answer })
}
