use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::algorithm::neighbour::KNNAlgorithmName;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::distance::euclidian::Euclidian;
use smartcore::neighbors::knn_regressor::{KNNRegressor, KNNRegressorParameters};

use crate::estimators::defaults::KNN_N_NEIGHBORS;
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};

type Knn = KNNRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>, Euclidian<f64>>;

/// k-nearest-neighbors regression with uniform weights and Euclidean distance.
///
/// Fitting stores the training set; `n_neighbors` must be at least 2 and no
/// larger than the number of training rows.
#[derive(Serialize, Deserialize)]
pub struct KNeighbors {
    n_neighbors: usize,
    n_features: usize,
    model: Option<Knn>,
}

impl Default for KNeighbors {
    fn default() -> Self {
        Self {
            n_neighbors: KNN_N_NEIGHBORS,
            n_features: 0,
            model: None,
        }
    }
}

impl fmt::Debug for KNeighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KNeighbors")
            .field("n_neighbors", &self.n_neighbors)
            .field("n_features", &self.n_features)
            .field("fitted", &self.model.is_some())
            .finish()
    }
}

impl KNeighbors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }
}

impl Estimator for KNeighbors {
    fn name(&self) -> &'static str {
        "KNeighbors"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        if self.n_neighbors < 2 || self.n_neighbors > features.nrows() {
            return Err(EstimatorError::InvalidParameter {
                name: "n_neighbors",
                reason: format!(
                    "must be between 2 and the number of training rows ({}), got {}",
                    features.nrows(),
                    self.n_neighbors
                ),
            });
        }

        let params = KNNRegressorParameters::default()
            .with_k(self.n_neighbors)
            .with_algorithm(KNNAlgorithmName::LinearSearch);
        let model = Knn::fit(&to_dense(&features), &labels.to_vec(), params)?;

        self.n_features = features.ncols();
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        let model = self.model.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_predict_input(&features, self.n_features)?;
        Ok(Array1::from(model.predict(&to_dense(&features))?))
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_averages_nearest_labels() {
        let x = array![[0.0], [1.0], [2.0], [10.0], [11.0]];
        let y = array![1.0, 2.0, 3.0, 100.0, 200.0];

        let mut model = KNeighbors::new().with_n_neighbors(2);
        model.fit(x.view(), y.view()).unwrap();

        let predictions = model.predict(array![[0.4], [10.6]].view()).unwrap();
        assert!((predictions[0] - 1.5).abs() < 1e-12);
        assert!((predictions[1] - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_rows_for_k() {
        let x = array![[0.0], [1.0]];
        let y = array![1.0, 2.0];
        let mut model = KNeighbors::new();
        let err = model.fit(x.view(), y.view()).unwrap_err();
        assert!(matches!(
            err,
            EstimatorError::InvalidParameter {
                name: "n_neighbors",
                ..
            }
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_single_neighbor_rejected() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];
        let mut model = KNeighbors::new().with_n_neighbors(1);
        assert!(matches!(
            model.fit(x.view(), y.view()),
            Err(EstimatorError::InvalidParameter { .. })
        ));
    }
}
