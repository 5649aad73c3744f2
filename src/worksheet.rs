//! Worksheet orchestration: route settings to a generator family, interleave
//! mixed-operation sheets and validate what the settings form posts.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::{Operation, Problem, ProblemType, WorksheetSettings};
use crate::error::{EngineError, Result};
use crate::generators::{
  generate_addition_problems, generate_division_problems, generate_grade_addition_problems,
  generate_grade_decimal_problems, generate_grade_division_problems, generate_grade_fraction_problems,
  generate_grade_multiplication_problems, generate_grade_subtraction_problems, generate_hissan_problems,
  generate_multiplication_problems, generate_subtraction_problems, GenerationOptions,
};
use crate::generators::grade::operation_taught;
use crate::patterns::generate_pattern_problems;

pub const MAX_PROBLEM_COUNT: usize = 100;
pub const MAX_GRADE: u8 = 6;
pub const MAX_LAYOUT_COLUMNS: u8 = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
  pub valid: bool,
  pub errors: Vec<String>,
}

/// Range checks only. Every violated bound is reported.
pub fn validate_settings(settings: &WorksheetSettings) -> ValidationResult {
  let mut errors = Vec::new();
  if !(1..=MAX_PROBLEM_COUNT).contains(&settings.problem_count) {
    errors.push(format!("問題数は1〜{MAX_PROBLEM_COUNT}の範囲で指定してください"));
  }
  if !(1..=MAX_GRADE).contains(&settings.grade) {
    errors.push(format!("学年は1〜{MAX_GRADE}の範囲で指定してください"));
  }
  if !(1..=MAX_LAYOUT_COLUMNS).contains(&settings.layout_columns) {
    errors.push(format!("列数は1〜{MAX_LAYOUT_COLUMNS}の範囲で指定してください"));
  }
  if let (Some(min), Some(max)) = (settings.min_number, settings.max_number) {
    if min > max {
      errors.push("最小値は最大値以下にしてください".to_string());
    }
  }
  ValidationResult { valid: errors.is_empty(), errors }
}

pub fn parse_operation(key: &str) -> Result<Operation> {
  key.parse()
}

fn has_bounds(settings: &WorksheetSettings) -> bool {
  settings.min_number.is_some() || settings.max_number.is_some() || settings.include_carry_over.is_some()
}

/// Bounds and carry policy from the settings form, as generator options.
fn settings_options(settings: &WorksheetSettings) -> GenerationOptions {
  GenerationOptions {
    min_number: settings.min_number,
    max_number: settings.max_number,
    include_carry_over: settings.include_carry_over.filter(|c| *c),
    exclude_carry_over: settings.include_carry_over.map(|c| !c).filter(|c| *c),
    ..Default::default()
  }
}

fn basic_problems<R: Rng + ?Sized>(rng: &mut R, settings: &WorksheetSettings) -> Vec<Problem> {
  let (grade, count) = (settings.grade, settings.problem_count);
  if !operation_taught(grade, settings.operation) {
    return Vec::new();
  }
  if has_bounds(settings) {
    // The integer generators read min/max/carry straight from the settings.
    let options = GenerationOptions::default();
    return match settings.operation {
      Operation::Addition => generate_addition_problems(rng, settings, count, &options),
      Operation::Subtraction => generate_subtraction_problems(rng, settings, count, &options),
      Operation::Multiplication => generate_multiplication_problems(rng, settings, count, &options),
      Operation::Division => {
        let options = GenerationOptions { allow_remainder: Some(grade >= 4), ..options };
        generate_division_problems(rng, settings, count, &options)
      }
    };
  }
  match settings.operation {
    Operation::Addition => generate_grade_addition_problems(rng, grade, count),
    Operation::Subtraction => generate_grade_subtraction_problems(rng, grade, count),
    Operation::Multiplication => generate_grade_multiplication_problems(rng, grade, count),
    Operation::Division => generate_grade_division_problems(rng, grade, count),
  }
}

/// Problems for one worksheet. A calculation pattern wins over the problem
/// type; otherwise the problem type and operation pick the generator.
#[instrument(
  level = "info",
  skip(rng, settings),
  fields(
    grade = settings.grade,
    problem_type = %settings.problem_type,
    op = %settings.operation,
    count = settings.problem_count
  )
)]
pub fn generate_problems<R: Rng + ?Sized>(rng: &mut R, settings: &WorksheetSettings) -> Result<Vec<Problem>> {
  let count = settings.problem_count;
  if let Some(pattern) = settings.calculation_pattern {
    return generate_pattern_problems(rng, pattern, count);
  }
  let problems = match settings.problem_type {
    ProblemType::Fraction => generate_grade_fraction_problems(rng, settings.grade, count),
    ProblemType::Decimal => generate_grade_decimal_problems(rng, settings.grade, count),
    ProblemType::Hissan => generate_hissan_problems(rng, settings, count, &settings_options(settings)),
    ProblemType::Word => return Err(EngineError::UnsupportedProblemType(ProblemType::Word)),
    ProblemType::Basic => basic_problems(rng, settings),
  };
  info!(target: "worksheet", produced = problems.len(), "Worksheet problems generated");
  Ok(problems)
}

/// Splits `problem_count` across `operations` (remainder to the first ones),
/// generates each share and shuffles the result so operations interleave.
/// A calculation pattern in `settings` is ignored: the operation list decides.
#[instrument(level = "info", skip(rng, settings), fields(grade = settings.grade, count = settings.problem_count))]
pub fn generate_mixed_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  operations: &[Operation],
) -> Result<Vec<Problem>> {
  if operations.is_empty() {
    return Err(EngineError::NoOperations);
  }
  let base = settings.problem_count / operations.len();
  let extra = settings.problem_count % operations.len();

  let mut problems = Vec::with_capacity(settings.problem_count);
  for (i, &operation) in operations.iter().enumerate() {
    let share = base + usize::from(i < extra);
    if share == 0 {
      continue;
    }
    let slice = WorksheetSettings {
      operation,
      problem_count: share,
      calculation_pattern: None,
      ..settings.clone()
    };
    problems.extend(generate_problems(rng, &slice)?);
  }
  problems.shuffle(rng);
  info!(target: "worksheet", produced = problems.len(), operations = operations.len(), "Mixed worksheet generated");
  Ok(problems)
}
