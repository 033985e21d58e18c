use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::estimators::defaults::{
    BOOSTING_LEARNING_RATE, BOOSTING_MAX_DEPTH, BOOSTING_N_ESTIMATORS,
};
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};
use crate::estimators::tree::{grow_tree, RegressionTree};

/// Gradient boosting with squared-error loss.
///
/// Starts from the label mean and adds shallow trees fitted on residuals,
/// each shrunk by `learning_rate`.
#[derive(Serialize, Deserialize)]
pub struct GradientBoosting {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: u16,
    n_features: usize,
    init: Option<f64>,
    stages: Vec<RegressionTree>,
}

impl Default for GradientBoosting {
    fn default() -> Self {
        Self {
            n_estimators: BOOSTING_N_ESTIMATORS,
            learning_rate: BOOSTING_LEARNING_RATE,
            max_depth: BOOSTING_MAX_DEPTH,
            n_features: 0,
            init: None,
            stages: Vec::new(),
        }
    }
}

impl fmt::Debug for GradientBoosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientBoosting")
            .field("n_estimators", &self.n_estimators)
            .field("learning_rate", &self.learning_rate)
            .field("max_depth", &self.max_depth)
            .field("n_features", &self.n_features)
            .field("init", &self.init)
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl GradientBoosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }
}

impl Estimator for GradientBoosting {
    fn name(&self) -> &'static str {
        "GradientBoosting"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(EstimatorError::InvalidParameter {
                name: "learning_rate",
                reason: format!("must be positive, got {}", self.learning_rate),
            });
        }

        let init = labels.mean().ok_or(EstimatorError::EmptyInput("labels"))?;
        let dense = to_dense(&features);
        let mut current = Array1::from_elem(labels.len(), init);
        let mut stages = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let residuals = (&labels - &current).to_vec();
            let tree = grow_tree(&dense, &residuals, Some(self.max_depth))?;

            for (c, step) in current.iter_mut().zip(tree.predict(&dense)?) {
                *c += self.learning_rate * step;
            }
            stages.push(tree);
        }

        self.n_features = features.ncols();
        self.init = Some(init);
        self.stages = stages;
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        let init = self.init.ok_or(EstimatorError::NotFitted)?;
        check_predict_input(&features, self.n_features)?;

        let dense = to_dense(&features);
        let mut predictions = Array1::from_elem(features.nrows(), init);
        for tree in &self.stages {
            for (p, step) in predictions.iter_mut().zip(tree.predict(&dense)?) {
                *p += self.learning_rate * step;
            }
        }
        Ok(predictions)
    }

    fn is_fitted(&self) -> bool {
        self.init.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_training_error_decreases_with_more_stages() {
        let x = Array2::from_shape_fn((30, 1), |(i, _)| i as f64);
        let y = x.column(0).mapv(|v| (v / 3.0).sin() * 10.0);

        let sse = |model: &GradientBoosting| {
            let p = model.predict(x.view()).unwrap();
            (&p - &y).mapv(|e| e * e).sum()
        };

        let mut few = GradientBoosting::new().with_n_estimators(5);
        let mut many = GradientBoosting::new().with_n_estimators(50);
        few.fit(x.view(), y.view()).unwrap();
        many.fit(x.view(), y.view()).unwrap();

        assert_eq!(many.n_stages(), 50);
        assert!(sse(&many) < sse(&few));
    }

    #[test]
    fn test_zero_stages_predicts_mean() {
        let x = Array2::from_shape_fn((4, 1), |(i, _)| i as f64);
        let y = Array1::from(vec![1.0, 2.0, 3.0, 6.0]);
        let mut model = GradientBoosting::new().with_n_estimators(0);
        model.fit(x.view(), y.view()).unwrap();

        let predictions = model.predict(x.view()).unwrap();
        assert!(predictions.iter().all(|p| (p - 3.0).abs() < 1e-12));
    }
}
