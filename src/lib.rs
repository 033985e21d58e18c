pub mod artifact;
pub mod cli;
pub mod data;
pub mod error;
pub mod estimators;
pub mod logging;
pub mod report;
pub mod trainer;

pub use error::{Result, Stage, TrainerError};
pub use trainer::{ModelTrainer, TrainerConfig, TrainingOutcome};
