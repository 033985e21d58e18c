#![allow(dead_code)]

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use model_trainer_rs::data::SplitData;
use model_trainer_rs::estimators::{Estimator, EstimatorError, FitResult};
use model_trainer_rs::trainer::CandidatePool;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Script {
    Succeed,
    FailFit,
    FailPredict,
    ShortPrediction,
}

/// Test double whose R² on `scripted_data` is exactly `target`.
///
/// The label equals the first feature column, so predicting
/// `mean + c * (x0 - mean)` with `c = 1 - sqrt(1 - target)` leaves residuals
/// of `(1 - c) * (y - mean)` and an R² of `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedEstimator {
    pub target: f64,
    pub script: Script,
    pub fitted: bool,
}

impl ScriptedEstimator {
    pub fn scoring(target: f64) -> Self {
        Self {
            target,
            script: Script::Succeed,
            fitted: false,
        }
    }

    pub fn failing(script: Script) -> Self {
        Self {
            target: 0.9,
            script,
            fitted: false,
        }
    }
}

impl Estimator for ScriptedEstimator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn fit(&mut self, _features: ArrayView2<'_, f64>, _labels: ArrayView1<'_, f64>) -> FitResult<()> {
        if self.script == Script::FailFit {
            return Err(EstimatorError::InvalidLabels("scripted fit failure".to_string()));
        }
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        if !self.fitted {
            return Err(EstimatorError::NotFitted);
        }
        match self.script {
            Script::FailPredict => Err(EstimatorError::Backend(
                "scripted predict failure".to_string(),
            )),
            Script::ShortPrediction => Ok(Array1::zeros(features.nrows().saturating_sub(1))),
            _ => {
                let x0 = features.column(0);
                let mean = x0.mean().unwrap_or(0.0);
                let c = 1.0 - (1.0 - self.target).sqrt();
                Ok(x0.mapv(|v| mean + c * (v - mean)))
            }
        }
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Features are `[x, 2x]`, label is `x`.
pub fn scripted_data() -> SplitData {
    let train_x: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let test_x = vec![1.0, 3.0, 4.0, 8.0, 10.0];
    let (train_features, train_labels) = columns(&train_x);
    let (test_features, test_labels) = columns(&test_x);
    SplitData::new(train_features, train_labels, test_features, test_labels)
        .expect("valid scripted data")
}

fn columns(xs: &[f64]) -> (Array2<f64>, Array1<f64>) {
    let mut features = Array2::zeros((xs.len(), 2));
    for (i, &x) in xs.iter().enumerate() {
        features[[i, 0]] = x;
        features[[i, 1]] = 2.0 * x;
    }
    (features, Array1::from(xs.to_vec()))
}

pub fn scripted_pool(entries: Vec<(&str, ScriptedEstimator)>) -> CandidatePool<ScriptedEstimator> {
    let mut pool = CandidatePool::new();
    for (name, estimator) in entries {
        pool.insert(name, estimator).expect("unique names");
    }
    pool
}

/// Combined arrays (features then label) for `y = 3 x1 - 2 x2 + 1` with a
/// small deterministic wobble.
pub fn linear_dataset(rows: usize, offset: usize) -> Array2<f64> {
    let mut data = Array2::zeros((rows, 3));
    for (i, mut row) in data.axis_iter_mut(Axis(0)).enumerate() {
        let k = i + offset;
        let x1 = k as f64 * 0.1;
        let x2 = ((k * 7) % 11) as f64;
        let wobble = 0.01 * (((k * 13) % 5) as f64 - 2.0);
        row[0] = x1;
        row[1] = x2;
        row[2] = 3.0 * x1 - 2.0 * x2 + 1.0 + wobble;
    }
    data
}

/// Combined arrays with a 0/1 label: 1 when the first feature exceeds 5.
pub fn binary_dataset(rows: usize, offset: usize) -> Array2<f64> {
    let mut data = Array2::zeros((rows, 3));
    for (i, mut row) in data.axis_iter_mut(Axis(0)).enumerate() {
        let k = i + offset;
        let x1 = ((k * 37) % 100) as f64 * 0.1 + 0.05;
        let x2 = ((k * 11) % 7) as f64;
        row[0] = x1;
        row[1] = x2;
        row[2] = if x1 > 5.0 { 1.0 } else { 0.0 };
    }
    data
}
