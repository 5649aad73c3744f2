//! Error types for the worksheet engine.
//!
//! Only structural mistakes are errors. Constraint misses inside the
//! generators are soft: they surface as `Sampled::satisfied == false`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ProblemType;

#[derive(Debug, Error)]
pub enum EngineError {
  /// Operation key not recognized, or not supported by an operator.
  #[error("unsupported operation: {0}")]
  UnsupportedOperation(String),

  /// Calculation pattern key has no generator.
  #[error("pattern not implemented: {0}")]
  PatternNotImplemented(String),

  /// Problem type cannot be produced without a calculation pattern.
  #[error("problem type '{0}' requires a calculation pattern")]
  UnsupportedProblemType(ProblemType),

  /// Mixed worksheet requested with an empty operation list.
  #[error("mixed worksheet needs at least one operation")]
  NoOperations,

  /// Configuration file could not be read or parsed.
  #[error("config error for '{path}': {message}")]
  Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
