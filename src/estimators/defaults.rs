//! Fixed default hyperparameters of the candidate pool.
//!
//! These are compile-time constants; the pool is not tuned at runtime.

/// Seed shared by every estimator that draws random numbers.
pub const RANDOM_STATE: u64 = 42;

// ─────────────────────────────────────────────────────────────────────────────
// Linear models
// ─────────────────────────────────────────────────────────────────────────────

/// Inverse L2 regularization strength for logistic regression.
pub const LOGISTIC_C: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Trees and ensembles
// ─────────────────────────────────────────────────────────────────────────────

pub const TREE_MIN_SAMPLES_SPLIT: usize = 2;
pub const TREE_MIN_SAMPLES_LEAF: usize = 1;

pub const FOREST_N_ESTIMATORS: usize = 100;

pub const BOOSTING_N_ESTIMATORS: usize = 100;
pub const BOOSTING_LEARNING_RATE: f64 = 0.1;
pub const BOOSTING_MAX_DEPTH: u16 = 3;

pub const ADABOOST_N_ESTIMATORS: usize = 50;
pub const ADABOOST_LEARNING_RATE: f64 = 1.0;
pub const ADABOOST_MAX_DEPTH: u16 = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Neighbors
// ─────────────────────────────────────────────────────────────────────────────

pub const KNN_N_NEIGHBORS: usize = 5;
