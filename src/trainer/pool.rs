use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};
use crate::estimators::{
    AdaBoost, DecisionTree, GradientBoosting, KNeighbors, LinearRegression, LogisticRegression,
    Model, RandomForest,
};

/// One named, not yet trained, estimator.
#[derive(Debug, Clone)]
pub struct Candidate<E> {
    pub name: String,
    pub estimator: E,
}

/// Ordered collection of uniquely named candidates.
///
/// Iteration order is insertion order; it decides ties during selection.
#[derive(Debug, Clone)]
pub struct CandidatePool<E = Model> {
    candidates: Vec<Candidate<E>>,
}

impl<E> Default for CandidatePool<E> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<E> CandidatePool<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate. Names must be unique within the pool.
    pub fn insert(&mut self, name: impl Into<String>, estimator: E) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(TrainerError::InvalidInput(format!(
                "duplicate candidate name '{}'",
                name
            )));
        }
        self.candidates.push(Candidate { name, estimator });
        Ok(())
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: impl Into<String>, estimator: E) -> Result<Self> {
        self.insert(name, estimator)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.candidates.iter().any(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&E> {
        self.candidates
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.estimator)
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate<E>> {
        self.candidates.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate<E>> {
        self.candidates.iter_mut()
    }

    /// Consume the pool, keeping only the named estimator.
    pub fn take(self, name: &str) -> Option<E> {
        self.candidates
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.estimator)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Which built-in pool to train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSet {
    /// Regressors only; works with any numeric label.
    #[default]
    Regression,
    /// Regressors plus logistic regression; labels must be 0 or 1.
    Classification,
}

/// Build the fixed candidate pool with default hyperparameters.
pub fn default_candidates(set: CandidateSet) -> CandidatePool<Model> {
    let mut candidates = Vec::new();
    if set == CandidateSet::Classification {
        candidates.push(candidate("Logistic Regression", LogisticRegression::new()));
    }
    candidates.extend([
        candidate("Linear Regression", LinearRegression::new()),
        candidate("Decision Tree", DecisionTree::new()),
        candidate("Random Forest", RandomForest::new()),
        candidate("Gradient Boosting", GradientBoosting::new()),
        candidate("K-Neighbors", KNeighbors::new()),
        candidate("AdaBoost", AdaBoost::new()),
    ]);
    CandidatePool { candidates }
}

fn candidate(name: &str, estimator: impl Into<Model>) -> Candidate<Model> {
    Candidate {
        name: name.to_string(),
        estimator: estimator.into(),
    }
}
