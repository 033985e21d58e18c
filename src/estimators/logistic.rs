use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{
    LogisticRegression as LogitModel, LogisticRegressionParameters,
};

use crate::estimators::defaults::LOGISTIC_C;
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, to_dense, Estimator, EstimatorError, FitResult,
};

type Logit = LogitModel<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Binary logistic regression with L2 regularization.
///
/// Labels must be exactly 0.0 or 1.0 and both classes must be present.
/// `predict` returns class labels as 0.0 / 1.0.
#[derive(Serialize, Deserialize)]
pub struct LogisticRegression {
    c: f64,
    n_features: usize,
    model: Option<Logit>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: LOGISTIC_C,
            n_features: 0,
            model: None,
        }
    }
}

impl fmt::Debug for LogisticRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogisticRegression")
            .field("c", &self.c)
            .field("n_features", &self.n_features)
            .field("fitted", &self.model.is_some())
            .finish()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map 0.0 / 1.0 labels to class ids, rejecting anything else.
fn binary_classes(labels: &ArrayView1<'_, f64>) -> FitResult<Vec<i32>> {
    let classes = labels
        .iter()
        .map(|&v| {
            if v == 0.0 {
                Ok(0)
            } else if v == 1.0 {
                Ok(1)
            } else {
                Err(EstimatorError::InvalidLabels(format!(
                    "logistic regression expects binary 0/1 labels, found {}",
                    v
                )))
            }
        })
        .collect::<FitResult<Vec<i32>>>()?;

    let positives = classes.iter().filter(|&&c| c == 1).count();
    if positives == 0 || positives == classes.len() {
        return Err(EstimatorError::InvalidLabels(
            "logistic regression needs samples of both classes".to_string(),
        ));
    }
    Ok(classes)
}

impl Estimator for LogisticRegression {
    fn name(&self) -> &'static str {
        "LogisticRegression"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        let classes = binary_classes(&labels)?;
        if !self.c.is_finite() || self.c <= 0.0 {
            return Err(EstimatorError::InvalidParameter {
                name: "c",
                reason: format!("must be positive, got {}", self.c),
            });
        }

        let params = LogisticRegressionParameters::default().with_alpha(1.0 / self.c);
        let model = Logit::fit(&to_dense(&features), &classes, params)?;

        self.n_features = features.ncols();
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        let model = self.model.as_ref().ok_or(EstimatorError::NotFitted)?;
        check_predict_input(&features, self.n_features)?;
        let classes = model.predict(&to_dense(&features))?;
        Ok(classes.into_iter().map(f64::from).collect())
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}
