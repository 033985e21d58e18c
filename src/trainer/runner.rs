use std::path::PathBuf;

use ndarray::Array2;
use serde::Serialize;
use tracing::info;

use crate::data::SplitData;
use crate::error::Result;
use crate::trainer::config::TrainerConfig;
use crate::trainer::evaluation::{evaluate, ScoreReport};
use crate::trainer::pool::default_candidates;
use crate::trainer::selection::select_and_persist_outcome;

/// Everything a training run produced.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingOutcome {
    pub model_name: String,
    pub best_score: f64,
    pub final_score: f64,
    pub artifact_path: PathBuf,
    pub scores: ScoreReport,
}

/// Trains the configured candidate pool and persists the winner.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    config: TrainerConfig,
}

impl ModelTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run on combined arrays whose last column is the label.
    pub fn initiate(&self, train: &Array2<f64>, test: &Array2<f64>) -> Result<TrainingOutcome> {
        info!("Split training and test input data");
        let data = SplitData::from_combined(train, test)?;
        self.run(&data)
    }

    /// Run on already separated features and labels.
    ///
    /// The test split doubles as the held-out set for the final score.
    pub fn run(&self, data: &SplitData) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let mut candidates = default_candidates(self.config.candidate_set);
        let scores = evaluate(data, &mut candidates)?;

        let selection = select_and_persist_outcome(
            &scores,
            candidates,
            &self.config.artifact_path,
            self.config.min_acceptable_score,
            data.test_features(),
            data.test_labels(),
        )?;
        info!(
            model = %selection.model_name,
            final_score = selection.final_score,
            "Training complete"
        );

        Ok(TrainingOutcome {
            model_name: selection.model_name,
            best_score: selection.best_score,
            final_score: selection.final_score,
            artifact_path: selection.artifact_path,
            scores,
        })
    }
}
