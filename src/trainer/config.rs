use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};
use crate::trainer::constants::{DEFAULT_ARTIFACT_DIR, DEFAULT_MODEL_FILE_NAME, MIN_ACCEPTABLE_SCORE};
use crate::trainer::pool::CandidateSet;

/// Configuration for a training run.
///
/// Missing keys in a TOML file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Where the winning model is written.
    pub artifact_path: PathBuf,
    /// Minimum score the winner must reach.
    pub min_acceptable_score: f64,
    /// Which built-in pool to train.
    pub candidate_set: CandidateSet,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            artifact_path: Path::new(DEFAULT_ARTIFACT_DIR).join(DEFAULT_MODEL_FILE_NAME),
            min_acceptable_score: MIN_ACCEPTABLE_SCORE,
            candidate_set: CandidateSet::default(),
        }
    }
}

impl TrainerConfig {
    /// Load from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TrainerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_acceptable_score.is_finite() {
            return Err(TrainerError::InvalidInput(format!(
                "min_acceptable_score must be finite, got {}",
                self.min_acceptable_score
            )));
        }
        if self.artifact_path.as_os_str().is_empty() {
            return Err(TrainerError::InvalidInput(
                "artifact_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
