use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::data::loader::split_features_labels;
use crate::error::{Result, TrainerError};

/// Training and test arrays, validated to be non-empty and shape-consistent.
#[derive(Debug, Clone)]
pub struct SplitData {
    train_features: Array2<f64>,
    train_labels: Array1<f64>,
    test_features: Array2<f64>,
    test_labels: Array1<f64>,
}

impl SplitData {
    pub fn new(
        train_features: Array2<f64>,
        train_labels: Array1<f64>,
        test_features: Array2<f64>,
        test_labels: Array1<f64>,
    ) -> Result<Self> {
        check_split("train", &train_features, &train_labels)?;
        check_split("test", &test_features, &test_labels)?;

        if train_features.ncols() != test_features.ncols() {
            return Err(TrainerError::InvalidInput(format!(
                "train has {} feature columns but test has {}",
                train_features.ncols(),
                test_features.ncols()
            )));
        }

        Ok(Self {
            train_features,
            train_labels,
            test_features,
            test_labels,
        })
    }

    /// Build from combined arrays whose last column is the label.
    pub fn from_combined(train: &Array2<f64>, test: &Array2<f64>) -> Result<Self> {
        let (train_features, train_labels) = split_features_labels(train)?;
        let (test_features, test_labels) = split_features_labels(test)?;
        Self::new(train_features, train_labels, test_features, test_labels)
    }

    pub fn train_features(&self) -> ArrayView2<'_, f64> {
        self.train_features.view()
    }

    pub fn train_labels(&self) -> ArrayView1<'_, f64> {
        self.train_labels.view()
    }

    pub fn test_features(&self) -> ArrayView2<'_, f64> {
        self.test_features.view()
    }

    pub fn test_labels(&self) -> ArrayView1<'_, f64> {
        self.test_labels.view()
    }

    pub fn n_features(&self) -> usize {
        self.train_features.ncols()
    }
}

fn check_split(name: &str, features: &Array2<f64>, labels: &Array1<f64>) -> Result<()> {
    if features.nrows() == 0 || features.ncols() == 0 {
        return Err(TrainerError::InvalidInput(format!(
            "{} features are empty",
            name
        )));
    }
    if labels.len() != features.nrows() {
        return Err(TrainerError::InvalidInput(format!(
            "{} has {} feature rows but {} labels",
            name,
            features.nrows(),
            labels.len()
        )));
    }
    Ok(())
}
