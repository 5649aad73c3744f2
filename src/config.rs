//! Loading worksheet configuration (answer language, default settings and
//! named presets) from TOML.
//!
//! ```toml
//! language = "ja"
//!
//! [defaults]
//! grade = 2
//! problemType = "basic"
//! operation = "addition"
//! problemCount = 20
//! layoutColumns = 2
//!
//! [[presets]]
//! name = "g2-carry"
//! grade = 2
//! problemType = "basic"
//! operation = "addition"
//! problemCount = 20
//! layoutColumns = 2
//! calculationPattern = "add-2d-with-carry"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::{Language, WorksheetSettings};
use crate::error::{EngineError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorksheetConfig {
  /// Language of remainder text in solved answers.
  #[serde(default)]
  pub language: Language,
  #[serde(default)]
  pub defaults: WorksheetSettings,
  #[serde(default)]
  pub presets: Vec<Preset>,
}

/// A named worksheet served by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
  pub name: String,
  #[serde(flatten)]
  pub settings: WorksheetSettings,
}

impl WorksheetConfig {
  pub fn preset(&self, name: &str) -> Option<&Preset> {
    self.presets.iter().find(|p| p.name == name)
  }
}

pub fn parse_worksheet_config(text: &str, path: &Path) -> Result<WorksheetConfig> {
  toml::from_str(text).map_err(|e| EngineError::Config { path: path.to_path_buf(), message: e.to_string() })
}

pub fn load_worksheet_config(path: impl AsRef<Path>) -> Result<WorksheetConfig> {
  let path = path.as_ref();
  let text = std::fs::read_to_string(path)
    .map_err(|e| EngineError::Config { path: path.to_path_buf(), message: e.to_string() })?;
  parse_worksheet_config(&text, path)
}

/// Attempt to load `WorksheetConfig` from WORKSHEET_CONFIG_PATH. Unset means
/// built-in defaults; a broken file is logged and also falls back to them.
pub fn load_worksheet_config_from_env() -> WorksheetConfig {
  let Ok(path) = std::env::var("WORKSHEET_CONFIG_PATH") else {
    return WorksheetConfig::default();
  };
  match load_worksheet_config(&path) {
    Ok(cfg) => {
      info!(target: "worksheet", %path, presets = cfg.presets.len(), "Loaded worksheet config (TOML)");
      cfg
    }
    Err(e) => {
      error!(target: "worksheet", %path, error = %e, "Failed to load worksheet config; using defaults");
      WorksheetConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Operation, ProblemType};
  use crate::patterns::CalculationPattern;

  const SAMPLE: &str = r#"
language = "en"

[defaults]
grade = 3
problemType = "hissan"
operation = "subtraction"
problemCount = 12
layoutColumns = 3

[[presets]]
name = "g2-carry"
grade = 2
problemType = "basic"
operation = "addition"
problemCount = 20
layoutColumns = 2
calculationPattern = "add-2d-with-carry"
"#;

  #[test]
  fn parses_defaults_and_presets() {
    let cfg = parse_worksheet_config(SAMPLE, Path::new("sample.toml")).unwrap();
    assert_eq!(cfg.language, Language::En);
    assert_eq!(cfg.defaults.problem_type, ProblemType::Hissan);
    assert_eq!(cfg.defaults.operation, Operation::Subtraction);
    let preset = cfg.preset("g2-carry").unwrap();
    assert_eq!(preset.settings.calculation_pattern, Some(CalculationPattern::Add2dWithCarry));
    assert!(cfg.preset("missing").is_none());
  }

  #[test]
  fn empty_file_is_all_defaults() {
    let cfg = parse_worksheet_config("", Path::new("empty.toml")).unwrap();
    assert_eq!(cfg, WorksheetConfig::default());
  }

  #[test]
  fn bad_file_reports_path() {
    let err = parse_worksheet_config("language = 7", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, EngineError::Config { ref path, .. } if path == Path::new("bad.toml")));
    assert!(matches!(load_worksheet_config("/nonexistent/sansu.toml"), Err(EngineError::Config { .. })));
  }
}
