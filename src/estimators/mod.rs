pub mod adaboost;
pub mod boosting;
pub mod defaults;
pub mod estimator;
pub mod forest;
pub mod knn;
pub mod linear;
pub mod logistic;
pub mod model;
pub mod tree;

pub use adaboost::AdaBoost;
pub use boosting::GradientBoosting;
pub use estimator::{Estimator, EstimatorError, FitResult};
pub use forest::RandomForest;
pub use knn::KNeighbors;
pub use linear::LinearRegression;
pub use logistic::LogisticRegression;
pub use model::Model;
pub use tree::DecisionTree;
