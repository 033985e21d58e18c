use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::estimators::defaults::{
    FOREST_N_ESTIMATORS, RANDOM_STATE, TREE_MIN_SAMPLES_LEAF, TREE_MIN_SAMPLES_SPLIT,
};
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Bagged ensemble of fully grown regression trees.
///
/// Every split considers all features, so only the bootstrap varies
/// between trees.
#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    n_estimators: usize,
    random_state: u64,
    n_features: usize,
    forest: Option<Forest>,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self {
            n_estimators: FOREST_N_ESTIMATORS,
            random_state: RANDOM_STATE,
            n_features: 0,
            forest: None,
        }
    }
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("n_estimators", &self.n_estimators)
            .field("random_state", &self.random_state)
            .field("n_features", &self.n_features)
            .field("fitted", &self.forest.is_some())
            .finish()
    }
}

impl RandomForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }
}

impl Estimator for RandomForest {
    fn name(&self) -> &'static str {
        "RandomForest"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        if self.n_estimators == 0 {
            return Err(EstimatorError::InvalidParameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_estimators)
            .with_m(features.ncols())
            .with_min_samples_split(TREE_MIN_SAMPLES_SPLIT)
            .with_min_samples_leaf(TREE_MIN_SAMPLES_LEAF)
            .with_seed(self.random_state);
        let forest = Forest::fit(&to_dense(&features), &labels.to_vec(), params)?;

        self.n_features = features.ncols();
        self.forest = Some(forest);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        let forest = self.forest.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_predict_input(&features, self.n_features)?;
        Ok(Array1::from(forest.predict(&to_dense(&features))?))
    }

    fn is_fitted(&self) -> bool {
        self.forest.is_some()
    }
}
