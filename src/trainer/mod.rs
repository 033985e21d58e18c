pub mod config;
pub mod constants;
pub mod evaluation;
pub mod metrics;
pub mod pool;
pub mod runner;
pub mod selection;

pub use config::TrainerConfig;
pub use evaluation::{evaluate, score_candidate, ModelScore, ScoreReport};
pub use metrics::r2_score;
pub use pool::{default_candidates, Candidate, CandidatePool, CandidateSet};
pub use runner::{ModelTrainer, TrainingOutcome};
pub use selection::{select_and_persist, select_and_persist_outcome, select_best, Selection};
