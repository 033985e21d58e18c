use ndarray::{Array1, ArrayView1, ArrayView2};
use smartcore::error::Failed;
use smartcore::linalg::basic::matrix::DenseMatrix;
use thiserror::Error;

/// Failure modes of a single estimator's fit or predict step.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("Estimator has not been fitted")]
    NotFitted,

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Non-finite values in {0}")]
    NonFinite(&'static str),

    #[error("Shape mismatch: {rows} feature rows but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("Feature mismatch: fitted with {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Prediction length mismatch: expected {expected}, got {actual}")]
    PredictionLength { expected: usize, actual: usize },

    #[error("Invalid labels: {0}")]
    InvalidLabels(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Model backend error: {0}")]
    Backend(String),
}

impl From<Failed> for EstimatorError {
    fn from(err: Failed) -> Self {
        EstimatorError::Backend(err.to_string())
    }
}

pub type FitResult<T> = std::result::Result<T, EstimatorError>;

/// Common capability set of every candidate model.
///
/// `fit` mutates the estimator in place; after it succeeds, `predict` must
/// return exactly one value per input row.
pub trait Estimator {
    /// Algorithm family name.
    fn name(&self) -> &'static str;

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()>;

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>>;

    fn is_fitted(&self) -> bool;
}

/// Validate training inputs shared by every estimator.
pub(crate) fn check_fit_input(
    features: &ArrayView2<'_, f64>,
    labels: &ArrayView1<'_, f64>,
) -> FitResult<()> {
    if features.nrows() == 0 || features.ncols() == 0 {
        return Err(EstimatorError::EmptyInput("features"));
    }
    if labels.len() != features.nrows() {
        return Err(EstimatorError::ShapeMismatch {
            rows: features.nrows(),
            labels: labels.len(),
        });
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(EstimatorError::NonFinite("features"));
    }
    if labels.iter().any(|v| !v.is_finite()) {
        return Err(EstimatorError::NonFinite("labels"));
    }
    Ok(())
}

/// Validate prediction inputs against the fitted feature count.
pub(crate) fn check_predict_input(
    features: &ArrayView2<'_, f64>,
    expected_features: usize,
) -> FitResult<()> {
    if features.nrows() == 0 {
        return Err(EstimatorError::EmptyInput("features"));
    }
    if features.ncols() != expected_features {
        return Err(EstimatorError::FeatureMismatch {
            expected: expected_features,
            actual: features.ncols(),
        });
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(EstimatorError::NonFinite("features"));
    }
    Ok(())
}

/// Copy a validated, non-empty feature view into a row-major `DenseMatrix`.
pub(crate) fn to_dense(features: &ArrayView2<'_, f64>) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = features.outer_iter().map(|row| row.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

/// Like `to_dense`, but only the rows at `indices` (repetition allowed).
pub(crate) fn select_dense(features: &ArrayView2<'_, f64>, indices: &[usize]) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = indices.iter().map(|&i| features.row(i).to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}
