//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{BasicProblem, Operation, Problem, WorksheetSettings};
use crate::patterns::{CategoryConfig, PatternInfo};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct WorksheetIn {
  pub settings: WorksheetSettings,
  #[serde(default)]
  pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct MixedWorksheetIn {
  pub settings: WorksheetSettings,
  pub operations: Vec<Operation>,
  #[serde(default)]
  pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetOut {
  pub id: String,
  pub layout_columns: u8,
  pub problems: Vec<Problem>,
}

#[derive(Debug, Deserialize)]
pub struct PatternListQuery {
  #[serde(default)]
  pub grade: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct PatternListOut {
  pub patterns: Vec<PatternInfo>,
  pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PatternQuery {
  #[serde(default)]
  pub count: Option<usize>,
  #[serde(default)]
  pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PatternOut {
  pub pattern: PatternInfo,
  pub problems: Vec<Problem>,
}

#[derive(Debug, Deserialize)]
pub struct PresetQuery {
  #[serde(default)]
  pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SolveIn {
  pub problem: BasicProblem,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolveOut {
  pub answer: String,
}
