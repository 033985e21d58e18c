mod common;

use assert_float_eq::assert_float_absolute_eq;

use common::{scripted_data, scripted_pool, linear_dataset, Script, ScriptedEstimator};
use model_trainer_rs::data::SplitData;
use model_trainer_rs::error::{Stage, TrainerError};
use model_trainer_rs::estimators::Estimator;
use model_trainer_rs::trainer::{default_candidates, evaluate, CandidatePool, CandidateSet};

#[test]
fn test_one_score_per_candidate_in_pool_order() {
    let data = scripted_data();
    let mut pool = scripted_pool(vec![
        ("A", ScriptedEstimator::scoring(0.72)),
        ("B", ScriptedEstimator::scoring(0.55)),
        ("C", ScriptedEstimator::scoring(-0.5)),
    ]);

    let report = evaluate(&data, &mut pool).unwrap();

    assert_eq!(report.names(), vec!["A", "B", "C"]);
    assert_float_absolute_eq!(report.get("A").unwrap(), 0.72, 1e-9);
    assert_float_absolute_eq!(report.get("B").unwrap(), 0.55, 1e-9);
    assert_float_absolute_eq!(report.get("C").unwrap(), -0.5, 1e-9);
    assert!(pool.iter().all(|c| c.estimator.is_fitted()));
}

#[test]
fn test_fit_failure_aborts_remaining_candidates() {
    let data = scripted_data();
    let mut pool = scripted_pool(vec![
        ("A", ScriptedEstimator::scoring(0.9)),
        ("B", ScriptedEstimator::failing(Script::FailFit)),
        ("C", ScriptedEstimator::scoring(0.8)),
    ]);

    match evaluate(&data, &mut pool) {
        Err(TrainerError::TrainingFailure { model, stage, .. }) => {
            assert_eq!(model, "B");
            assert_eq!(stage, Stage::Fit);
        }
        other => panic!("expected TrainingFailure, got {:?}", other),
    }

    assert!(pool.get("A").unwrap().is_fitted());
    assert!(!pool.get("C").unwrap().is_fitted());
}

#[test]
fn test_predict_failure_names_stage() {
    let data = scripted_data();
    let mut pool = scripted_pool(vec![("A", ScriptedEstimator::failing(Script::FailPredict))]);

    let err = evaluate(&data, &mut pool).unwrap_err();
    assert!(matches!(
        err,
        TrainerError::TrainingFailure {
            stage: Stage::Predict,
            ..
        }
    ));
    assert!(err.to_string().contains("'A'"));
    assert!(err.to_string().contains("predict"));
}

#[test]
fn test_wrong_prediction_length_is_score_failure() {
    let data = scripted_data();
    let mut pool = scripted_pool(vec![("A", ScriptedEstimator::failing(Script::ShortPrediction))]);

    assert!(matches!(
        evaluate(&data, &mut pool),
        Err(TrainerError::TrainingFailure {
            stage: Stage::Score,
            ..
        })
    ));
}

#[test]
fn test_empty_pool_is_rejected() {
    let data = scripted_data();
    let mut pool: CandidatePool<ScriptedEstimator> = CandidatePool::new();
    assert!(matches!(
        evaluate(&data, &mut pool),
        Err(TrainerError::EmptyPool)
    ));
}

#[test]
fn test_default_pool_is_deterministic() {
    let data = SplitData::from_combined(&linear_dataset(60, 0), &linear_dataset(20, 60)).unwrap();

    let mut first = default_candidates(CandidateSet::Regression);
    let mut second = default_candidates(CandidateSet::Regression);
    let a = evaluate(&data, &mut first).unwrap();
    let b = evaluate(&data, &mut second).unwrap();

    assert_eq!(a.len(), 6);
    assert_eq!(a, b);
}
