use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::estimators::defaults::{
    ADABOOST_LEARNING_RATE, ADABOOST_MAX_DEPTH, ADABOOST_N_ESTIMATORS, RANDOM_STATE,
};
use crate::estimators::estimator::{
    check_fit_input, check_predict_input, select_dense, to_dense, Estimator, EstimatorError,
    FitResult,
};
use crate::estimators::tree::{grow_tree, RegressionTree};

#[derive(Serialize, Deserialize)]
struct WeightedStage {
    tree: RegressionTree,
    weight: f64,
}

/// AdaBoost.R2 with linear loss over shallow regression trees.
///
/// Each stage trains on a weighted resample of the data. Predictions are the
/// weighted median of the stage predictions.
#[derive(Serialize, Deserialize)]
pub struct AdaBoost {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: u16,
    random_state: u64,
    n_features: usize,
    stages: Vec<WeightedStage>,
}

impl Default for AdaBoost {
    fn default() -> Self {
        Self {
            n_estimators: ADABOOST_N_ESTIMATORS,
            learning_rate: ADABOOST_LEARNING_RATE,
            max_depth: ADABOOST_MAX_DEPTH,
            random_state: RANDOM_STATE,
            n_features: 0,
            stages: Vec::new(),
        }
    }
}

impl fmt::Debug for AdaBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaBoost")
            .field("n_estimators", &self.n_estimators)
            .field("learning_rate", &self.learning_rate)
            .field("max_depth", &self.max_depth)
            .field("random_state", &self.random_state)
            .field("n_features", &self.n_features)
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Draw `n` indices with probability proportional to `weights`.
fn weighted_resample(weights: &[f64], n: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut running = 0.0;
    for w in weights {
        running += w;
        cumulative.push(running);
    }
    (0..n)
        .map(|_| {
            let draw = rng.gen_range(0.0..1.0) * running;
            cumulative
                .partition_point(|&c| c <= draw)
                .min(weights.len() - 1)
        })
        .collect()
}

/// Value at which the cumulative weight first reaches half the total.
fn weighted_median(mut pairs: Vec<(f64, f64)>) -> f64 {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let total: f64 = pairs.iter().map(|(_, w)| w).sum();
    let mut running = 0.0;
    for (value, weight) in &pairs {
        running += weight;
        if running >= 0.5 * total {
            return *value;
        }
    }
    pairs.last().map(|(v, _)| *v).unwrap_or(0.0)
}

impl AdaBoost {
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

impl Estimator for AdaBoost {
    fn name(&self) -> &'static str {
        "AdaBoost"
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> FitResult<()> {
        check_fit_input(&features, &labels)?;
        if self.n_estimators == 0 {
            return Err(EstimatorError::InvalidParameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }

        let n = features.nrows();
        let dense = to_dense(&features);
        let mut rng = StdRng::seed_from_u64(self.random_state);
        let mut sample_weights = vec![1.0 / n as f64; n];
        let mut stages: Vec<WeightedStage> = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let rows = weighted_resample(&sample_weights, n, &mut rng);
            let resampled: Vec<f64> = rows.iter().map(|&i| labels[i]).collect();
            let tree = grow_tree(&select_dense(&features, &rows), &resampled, Some(self.max_depth))?;

            let errors: Vec<f64> = tree
                .predict(&dense)?
                .into_iter()
                .zip(labels.iter())
                .map(|(p, y)| (p - y).abs())
                .collect();
            let max_error = errors.iter().copied().fold(0.0, f64::max);

            if max_error <= 0.0 {
                // Perfect fit; this stage alone decides.
                stages.push(WeightedStage { tree, weight: 1.0 });
                break;
            }

            let average_loss: f64 = errors
                .iter()
                .zip(&sample_weights)
                .map(|(e, w)| w * e / max_error)
                .sum();

            if average_loss >= 0.5 {
                if stages.is_empty() {
                    stages.push(WeightedStage { tree, weight: 1.0 });
                }
                break;
            }
            if average_loss <= 0.0 {
                stages.push(WeightedStage { tree, weight: 1.0 });
                break;
            }

            let beta = average_loss / (1.0 - average_loss);
            let weight = self.learning_rate * (1.0 / beta).ln();

            for (w, e) in sample_weights.iter_mut().zip(&errors) {
                *w *= beta.powf((1.0 - e / max_error) * self.learning_rate);
            }
            let total: f64 = sample_weights.iter().sum();
            if total <= 0.0 || !total.is_finite() {
                stages.push(WeightedStage { tree, weight });
                break;
            }
            for w in sample_weights.iter_mut() {
                *w /= total;
            }

            stages.push(WeightedStage { tree, weight });
        }

        self.n_features = features.ncols();
        self.stages = stages;
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> FitResult<Array1<f64>> {
        if !self.is_fitted() {
            return Err(EstimatorError::NotFitted);
        }
        check_predict_input(&features, self.n_features)?;

        let dense = to_dense(&features);
        let stage_predictions = self
            .stages
            .iter()
            .map(|s| Ok((s.tree.predict(&dense)?, s.weight)))
            .collect::<FitResult<Vec<(Vec<f64>, f64)>>>()?;

        Ok((0..features.nrows())
            .map(|i| {
                let pairs = stage_predictions
                    .iter()
                    .map(|(p, weight)| (p[i], *weight))
                    .collect();
                weighted_median(pairs)
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        !self.stages.is_empty()
    }
}
