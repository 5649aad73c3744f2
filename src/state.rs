//! Application state: the loaded worksheet configuration and per-request RNGs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::config::{load_worksheet_config_from_env, WorksheetConfig};

#[derive(Clone, Debug, Default)]
pub struct AppState {
  pub config: WorksheetConfig,
}

impl AppState {
  /// Build state from env (WORKSHEET_CONFIG_PATH).
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let config = load_worksheet_config_from_env();
    for preset in &config.presets {
      info!(target: "worksheet", name = %preset.name, grade = preset.settings.grade, "Preset available");
    }
    Self { config }
  }

  pub fn with_config(config: WorksheetConfig) -> Self {
    Self { config }
  }
}

/// Seeded when the request names a seed, from OS entropy otherwise.
pub fn request_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  }
}
