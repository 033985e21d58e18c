use serde::Serialize;
use tracing::{debug, info};

use crate::data::SplitData;
use crate::error::{Result, Stage, TrainerError};
use crate::estimators::{Estimator, EstimatorError};
use crate::trainer::metrics::r2_score;
use crate::trainer::pool::CandidatePool;

/// Held-out score of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelScore {
    pub name: String,
    pub score: f64,
}

/// One score per candidate, in pool order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreReport {
    entries: Vec<ModelScore>,
}

impl ScoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a score. Names are expected to be unique.
    pub fn push(&mut self, name: impl Into<String>, score: f64) {
        self.entries.push(ModelScore {
            name: name.into(),
            score,
        });
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelScore> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score; on ties, the first entry in report order wins.
    pub fn best(&self) -> Option<&ModelScore> {
        let mut best: Option<&ModelScore> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.score > b.score) {
                best = Some(entry);
            }
        }
        best
    }

    /// Entries sorted best first. The sort is stable, so ties keep report order.
    pub fn ranked(&self) -> Vec<&ModelScore> {
        let mut ranked: Vec<&ModelScore> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

impl FromIterator<(String, f64)> for ScoreReport {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut report = ScoreReport::new();
        for (name, score) in iter {
            report.push(name, score);
        }
        report
    }
}

fn training_failure(name: &str, stage: Stage, source: EstimatorError) -> TrainerError {
    TrainerError::TrainingFailure {
        model: name.to_string(),
        stage,
        source,
    }
}

/// Fit, predict and score a single candidate.
pub fn score_candidate<E: Estimator>(name: &str, estimator: &mut E, data: &SplitData) -> Result<f64> {
    estimator
        .fit(data.train_features(), data.train_labels())
        .map_err(|e| training_failure(name, Stage::Fit, e))?;

    let predictions = estimator
        .predict(data.test_features())
        .map_err(|e| training_failure(name, Stage::Predict, e))?;

    let expected = data.test_labels().len();
    if predictions.len() != expected {
        return Err(training_failure(
            name,
            Stage::Score,
            EstimatorError::PredictionLength {
                expected,
                actual: predictions.len(),
            },
        ));
    }

    let score = r2_score(data.test_labels(), predictions.view())?;
    if !score.is_finite() {
        return Err(training_failure(
            name,
            Stage::Score,
            EstimatorError::NonFinite("score"),
        ));
    }
    Ok(score)
}

/// Train and score every candidate, strictly in pool order.
///
/// Every estimator is fitted in place. The first failure aborts the run;
/// candidates after it are left untouched.
pub fn evaluate<E: Estimator>(data: &SplitData, candidates: &mut CandidatePool<E>) -> Result<ScoreReport> {
    if candidates.is_empty() {
        return Err(TrainerError::EmptyPool);
    }

    info!(
        candidates = candidates.len(),
        train_rows = data.train_labels().len(),
        test_rows = data.test_labels().len(),
        "Evaluating candidate pool"
    );

    let mut report = ScoreReport::new();
    for candidate in candidates.iter_mut() {
        debug!(model = %candidate.name, kind = candidate.estimator.name(), "Fitting");
        let score = score_candidate(&candidate.name, &mut candidate.estimator, data)?;
        info!(model = %candidate.name, score, "Scored candidate");
        report.push(candidate.name.clone(), score);
    }
    Ok(report)
}
