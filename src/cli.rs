use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::trainer::constants::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO};
use crate::trainer::CandidateSet;

/// ModelTrainer: trains a pool of candidate models and keeps the best one.
#[derive(Parser, Debug)]
#[command(name = "model_trainer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train every candidate, pick the best and save it.
    Train(TrainArgs),

    /// Predict with a saved model.
    Predict {
        /// Path to the model artifact.
        #[arg(long)]
        artifact: PathBuf,

        /// CSV of feature columns, with a header row.
        #[arg(long)]
        input: PathBuf,
    },

    /// List the candidates that would be trained.
    Candidates {
        /// Candidate set to list.
        #[arg(long, value_enum)]
        task: Option<CandidateSet>,
    },
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Training CSV; the last column is the label.
    #[arg(long, requires = "test", conflicts_with = "data")]
    pub train: Option<PathBuf>,

    /// Test CSV; the last column is the label.
    #[arg(long, requires = "train", conflicts_with = "data")]
    pub test: Option<PathBuf>,

    /// Single CSV to split into train and test.
    #[arg(long, required_unless_present = "train")]
    pub data: Option<PathBuf>,

    /// Fraction of rows held out when splitting --data.
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
    pub test_ratio: f64,

    /// Seed for the --data shuffle.
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    pub split_seed: u64,

    /// Where to write the selected model.
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Minimum acceptable score.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Candidate set to train.
    #[arg(long, value_enum)]
    pub task: Option<CandidateSet>,

    /// TOML config; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write the ranked scores to this CSV.
    #[arg(long)]
    pub scores_csv: Option<PathBuf>,

    /// Also write a JSON summary of the run.
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}
