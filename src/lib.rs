//! Sansu worksheets: the arithmetic problem engine behind a printable
//! elementary-school worksheet generator, plus the HTTP surface that serves it.
//!
//! Every generator takes an explicit RNG handle; seed one with
//! `StdRng::seed_from_u64` for reproducible worksheets.

pub mod config;
pub mod decimal;
pub mod domain;
pub mod error;
pub mod fraction;
pub mod generators;
pub mod missing;
pub mod patterns;
pub mod protocol;
pub mod random;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod worksheet;

pub use domain::{
  BasicProblem, DecimalProblem, FractionProblem, HissanProblem, Language, MissingPosition, MixedNumberProblem,
  Operation, Problem, ProblemType, WordProblem, WorksheetSettings,
};
pub use error::{EngineError, Result};
pub use generators::{GenerationOptions, Sampled};
pub use patterns::{
  all_patterns, category_config, generate_pattern_problems, generate_pattern_problems_by_key, pattern_info,
  patterns_for_grade, CalculationPattern, Category, PatternInfo,
};
pub use worksheet::{generate_mixed_problems, generate_problems, parse_operation, validate_settings, ValidationResult};
