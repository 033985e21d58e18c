use std::path::{Path, PathBuf};

use ndarray::{ArrayView1, ArrayView2};
use serde::Serialize;
use tracing::{info, warn};

use crate::artifact::{save_artifact, ModelArtifact};
use crate::error::{Result, Stage, TrainerError};
use crate::estimators::Estimator;
use crate::trainer::evaluation::{ModelScore, ScoreReport};
use crate::trainer::metrics::r2_score;
use crate::trainer::pool::CandidatePool;

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub model_name: String,
    /// Score from the evaluation run.
    pub best_score: f64,
    /// Score recomputed on the held-out set after persisting.
    pub final_score: f64,
    pub artifact_path: PathBuf,
}

/// Pick the best-scoring candidate and apply the acceptance threshold.
///
/// Ties go to the first candidate in report order. A non-finite score
/// anywhere in the report is rejected before ranking.
pub fn select_best(scores: &ScoreReport, min_acceptable_score: f64) -> Result<&ModelScore> {
    if let Some(bad) = scores.iter().find(|e| !e.score.is_finite()) {
        return Err(TrainerError::InvalidInput(format!(
            "candidate '{}' has a non-finite score ({})",
            bad.name, bad.score
        )));
    }
    let best = scores.best().ok_or(TrainerError::EmptyPool)?;

    // False for a NaN threshold as well.
    let accepted = best.score >= min_acceptable_score;
    if !accepted {
        warn!(
            model = %best.name,
            score = best.score,
            threshold = min_acceptable_score,
            "Best candidate is below the acceptance threshold"
        );
        return Err(TrainerError::NoAcceptableModel {
            model: best.name.clone(),
            score: best.score,
            threshold: min_acceptable_score,
        });
    }
    Ok(best)
}

/// Select the winner, persist it and return its recomputed held-out score.
pub fn select_and_persist<E: Estimator + Serialize>(
    scores: &ScoreReport,
    candidates: CandidatePool<E>,
    artifact_path: &Path,
    min_acceptable_score: f64,
    held_out_features: ArrayView2<'_, f64>,
    held_out_labels: ArrayView1<'_, f64>,
) -> Result<f64> {
    let selection = select_and_persist_outcome(
        scores,
        candidates,
        artifact_path,
        min_acceptable_score,
        held_out_features,
        held_out_labels,
    )?;
    Ok(selection.final_score)
}

/// Like `select_and_persist`, but returns the full `Selection`.
///
/// The pool is consumed: the winner moves into the artifact and every other
/// candidate is dropped.
pub fn select_and_persist_outcome<E: Estimator + Serialize>(
    scores: &ScoreReport,
    candidates: CandidatePool<E>,
    artifact_path: &Path,
    min_acceptable_score: f64,
    held_out_features: ArrayView2<'_, f64>,
    held_out_labels: ArrayView1<'_, f64>,
) -> Result<Selection> {
    let best = select_best(scores, min_acceptable_score)?;
    let model_name = best.name.clone();
    let best_score = best.score;

    info!(model = %model_name, score = best_score, "Best model found on the test set");

    let model = candidates.take(&model_name).ok_or_else(|| {
        TrainerError::InvalidInput(format!(
            "score report names '{}' which is not in the candidate pool",
            model_name
        ))
    })?;
    if !model.is_fitted() {
        return Err(TrainerError::InvalidInput(format!(
            "candidate '{}' has not been fitted",
            model_name
        )));
    }

    let artifact = ModelArtifact::new(model_name.clone(), best_score, model);
    save_artifact(artifact_path, &artifact).map_err(|source| TrainerError::PersistenceFailure {
        model: model_name.clone(),
        path: artifact_path.to_path_buf(),
        source,
    })?;
    info!(model = %model_name, path = %artifact_path.display(), "Saved model artifact");

    let predicted = artifact
        .model
        .predict(held_out_features)
        .map_err(|source| TrainerError::TrainingFailure {
            model: model_name.clone(),
            stage: Stage::Predict,
            source,
        })?;
    let final_score = r2_score(held_out_labels, predicted.view())?;

    Ok(Selection {
        model_name,
        best_score,
        final_score,
        artifact_path: artifact_path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(entries: &[(&str, f64)]) -> ScoreReport {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    #[test]
    fn test_select_best_above_threshold() {
        let scores = report(&[("A", 0.72), ("B", 0.55)]);
        let best = select_best(&scores, 0.6).unwrap();
        assert_eq!(best.name, "A");
    }

    #[test]
    fn test_select_best_exactly_at_threshold_is_accepted() {
        let scores = report(&[("A", 0.6)]);
        assert!(select_best(&scores, 0.6).is_ok());
    }

    #[test]
    fn test_select_best_below_threshold() {
        let scores = report(&[("A", 0.3), ("B", 0.4)]);
        match select_best(&scores, 0.6) {
            Err(TrainerError::NoAcceptableModel {
                model,
                score,
                threshold,
            }) => {
                assert_eq!(model, "B");
                assert_eq!(score, 0.4);
                assert_eq!(threshold, 0.6);
            }
            other => panic!("expected NoAcceptableModel, got {:?}", other),
        }
    }

    #[test]
    fn test_select_best_empty_report() {
        assert!(matches!(
            select_best(&ScoreReport::new(), 0.6),
            Err(TrainerError::EmptyPool)
        ));
    }

    #[test]
    fn test_select_best_rejects_nan_score() {
        // NaN compares false against everything, so it would otherwise win
        // the ranking and slip past the threshold.
        let scores = report(&[("A", f64::NAN), ("B", 0.2)]);
        match select_best(&scores, 0.6) {
            Err(TrainerError::InvalidInput(msg)) => assert!(msg.contains("'A'")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_select_best_rejects_infinite_score() {
        let scores = report(&[("A", 0.9), ("B", f64::INFINITY)]);
        assert!(matches!(
            select_best(&scores, 0.6),
            Err(TrainerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nan_threshold_accepts_nothing() {
        let scores = report(&[("A", 0.9)]);
        assert!(matches!(
            select_best(&scores, f64::NAN),
            Err(TrainerError::NoAcceptableModel { .. })
        ));
    }
}
