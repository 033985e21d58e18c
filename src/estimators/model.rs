use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::estimators::adaboost::AdaBoost;
use crate::estimators::boosting::GradientBoosting;
use crate::estimators::estimator::{Estimator, FitResult};
use crate::estimators::forest::RandomForest;
use crate::estimators::knn::KNeighbors;
use crate::estimators::linear::LinearRegression;
use crate::estimators::logistic::LogisticRegression;
use crate::estimators::tree::DecisionTree;

/// Any model of the built-in pool.
///
/// This is the artifact payload type: the `kind` tag lets the loader restore
/// the right family without knowing in advance which one won.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum Model {
    LinearRegression(LinearRegression),
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
    KNeighbors(KNeighbors),
    AdaBoost(AdaBoost),
}

macro_rules! dispatch {
    ($self:expr, $model:ident => $body:expr) => {
        match $self {
            Model::LinearRegression($model) => $body,
            Model::LogisticRegression($model) => $body,
            Model::DecisionTree($model) => $body,
            Model::RandomForest($model) => $body,
            Model::GradientBoosting($model) => $body,
            Model::KNeighbors($model) => $body,
            Model::AdaBoost($model) => $body,
        }
    };
}

impl Estimator for Model {
    fn name(&self) -> &'static str {
        dispatch!(self, m => m.name())
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        dispatch!(self, m => m.fit(features, labels))
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        dispatch!(self, m => m.predict(features))
    }

    fn is_fitted(&self) -> bool {
        dispatch!(self, m => m.is_fitted())
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Model {
                fn from(model: $variant) -> Self {
                    Model::$variant(model)
                }
            }
        )*
    };
}

impl_from!(
    LinearRegression,
    LogisticRegression,
    DecisionTree,
    RandomForest,
    GradientBoosting,
    KNeighbors,
    AdaBoost
);

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dispatch_reaches_inner_model() {
        let mut model = Model::from(LinearRegression::new());
        assert_eq!(model.name(), "LinearRegression");
        assert!(!model.is_fitted());

        let x = array![[0.0], [1.0], [2.0]];
        let y = array![1.0, 3.0, 5.0];
        model.fit(x.view(), y.view()).unwrap();
        assert!(model.is_fitted());

        let predictions = model.predict(array![[3.0]].view()).unwrap();
        assert!((predictions[0] - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_serialized_form_is_tagged() {
        let model = Model::from(KNeighbors::new());
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["kind"], "k_neighbors");
        assert!(json.get("params").is_some());
    }

    #[test]
    fn test_fitted_tree_survives_json() {
        let x = array![[1.0], [2.0], [8.0], [9.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];
        let mut model = Model::from(DecisionTree::new());
        model.fit(x.view(), y.view()).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: Model = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.name(), "DecisionTree");
        assert_eq!(
            restored.predict(x.view()).unwrap(),
            model.predict(x.view()).unwrap()
        );
    }
}
