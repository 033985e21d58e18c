use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression as OlsModel, LinearRegressionParameters, LinearRegressionSolverName,
};

use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};

type Ols = OlsModel<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Ordinary least squares with an intercept.
///
/// Solved by SVD, so collinear features do not make the fit fail.
#[derive(Default, Serialize, Deserialize)]
pub struct LinearRegression {
    n_features: usize,
    model: Option<Ols>,
}

impl fmt::Debug for LinearRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearRegression")
            .field("n_features", &self.n_features)
            .field("fitted", &self.model.is_some())
            .finish()
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for LinearRegression {
    fn name(&self) -> &'static str {
        "LinearRegression"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;

        let params = LinearRegressionParameters::default().with_solver(LinearRegressionSolverName::SVD);
        let model = Ols::fit(&to_dense(&features), &labels.to_vec(), params)?;

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
