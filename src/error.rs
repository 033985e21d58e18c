use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::estimators::EstimatorError;

/// Step of a candidate's evaluation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fit,
    Predict,
    Score,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fit => "fit",
            Stage::Predict => "predict",
            Stage::Score => "score",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("Training failed for model '{model}' during {stage}: {source}")]
    TrainingFailure {
        model: String,
        stage: Stage,
        #[source]
        source: EstimatorError,
    },

    #[error(
        "No acceptable model found: best was '{model}' with score {score:.4}, below threshold {threshold}"
    )]
    NoAcceptableModel {
        model: String,
        score: f64,
        threshold: f64,
    },

    #[error("Persisting model '{model}' to {} failed: {source}", path.display())]
    PersistenceFailure {
        model: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Candidate pool is empty")]
    EmptyPool,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid artifact: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl TrainerError {
    /// Whether the caller can recover by retrying with a different pool or data.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrainerError::NoAcceptableModel { .. })
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
