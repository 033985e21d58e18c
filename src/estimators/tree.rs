use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};

use crate::estimators::defaults::{TREE_MIN_SAMPLES_LEAF, TREE_MIN_SAMPLES_SPLIT};
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};

/// Fitted CART regression tree, shared with the boosted ensembles.
pub(crate) type RegressionTree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Grow a squared-error tree; `None` means unlimited depth.
pub(crate) fn grow_tree(
    features: &DenseMatrix<f64>,
    labels: &Vec<f64>,
    max_depth: Option<u16>,
) -> FitResult<RegressionTree> {
    let mut params = DecisionTreeRegressorParameters::default()
        .with_min_samples_split(TREE_MIN_SAMPLES_SPLIT)
        .with_min_samples_leaf(TREE_MIN_SAMPLES_LEAF);
    if let Some(depth) = max_depth {
        params = params.with_max_depth(depth);
    }
    Ok(RegressionTree::fit(features, labels, params)?)
}

/// CART regression tree using squared error.
#[derive(Default, Serialize, Deserialize)]
pub struct DecisionTree {
    max_depth: Option<u16>,
    n_features: usize,
    tree: Option<RegressionTree>,
}

impl fmt::Debug for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTree")
            .field("max_depth", &self.max_depth)
            .field("n_features", &self.n_features)
            .field("fitted", &self.tree.is_some())
            .finish()
    }
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

impl Estimator for DecisionTree {
    fn name(&self) -> &'static str {
        "DecisionTree"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        let tree = grow_tree(&to_dense(&features), &labels.to_vec(), self.max_depth)?;

        self.n_features = features.ncols();
        self.tree = Some(tree);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        let tree = self.tree.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_predict_input(&features, self.n_features)?;
        Ok(Array1::from(tree.predict(&to_dense(&features))?))
    }

    fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_fits_step_function_exactly() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = array![5.0, 5.0, 5.0, 20.0, 20.0, 20.0];

        let mut tree = DecisionTree::new();
        tree.fit(x.view(), y.view()).unwrap();

        let predictions = tree.predict(array![[0.0], [6.0], [7.0], [100.0]].view()).unwrap();
        assert_eq!(predictions, array![5.0, 5.0, 20.0, 20.0]);
    }

    #[test]
    fn test_unlimited_depth_memorizes_training_rows() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let mut full = DecisionTree::new();
        full.fit(x.view(), y.view()).unwrap();
        let predictions = full.predict(x.view()).unwrap();
        for (p, t) in predictions.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        // A stump can only tell two groups apart.
        let mut stump = DecisionTree::new().with_max_depth(1);
        stump.fit(x.view(), y.view()).unwrap();
        let predictions = stump.predict(x.view()).unwrap();
        let mut distinct: Vec<f64> = predictions.to_vec();
        distinct.dedup();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_alternating_labels_grow_deep_tree_without_overflow() {
        // Alternating labels force one leaf per row, which yields a very deep,
        // chain-shaped tree.
        let n = 2_000;
        let x = Array2::from_shape_fn((n, 1), |(i, _)| i as f64);
        let y = Array1::from_shape_fn(n, |i| (i % 2) as f64);

        let mut tree = DecisionTree::new();
        tree.fit(x.view(), y.view()).unwrap();

        let predictions = tree.predict(x.view()).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_feature_mismatch_on_predict() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![1.0, 2.0];
        let mut tree = DecisionTree::new();
        tree.fit(x.view(), y.view()).unwrap();
        assert!(matches!(
            tree.predict(array![[1.0]].view()),
            Err(EstimatorError::FeatureMismatch { .. })
        ));
    }
}
