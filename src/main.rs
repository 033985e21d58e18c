use std::path::Path;

use clap::Parser;
use tracing::info;

use model_trainer_rs::artifact::{load_artifact, ModelArtifact};
use model_trainer_rs::cli::{Cli, Command, TrainArgs};
use model_trainer_rs::data::{load_matrix, train_test_split};
use model_trainer_rs::error::{Result, TrainerError};
use model_trainer_rs::estimators::{Estimator, Model};
use model_trainer_rs::logging::init_logging;
use model_trainer_rs::report::{
    print_candidates, print_leaderboard, print_outcome, print_predictions, write_scores_csv,
    write_summary_json,
};
use model_trainer_rs::trainer::{default_candidates, ModelTrainer, TrainerConfig};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Error: {}", e);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        let code = if e.is_recoverable() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Train(args) => cmd_train(args),
        Command::Predict { artifact, input } => cmd_predict(&artifact, &input),
        Command::Candidates { task } => {
            print_candidates(&default_candidates(task.unwrap_or_default()));
            Ok(())
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(args: &TrainArgs) -> Result<TrainerConfig> {
    let mut config = match &args.config {
        Some(path) => TrainerConfig::from_toml_file(path)?,
        None => TrainerConfig::default(),
    };

    if let Some(path) = &args.artifact {
        config.artifact_path = path.clone();
    }
    if let Some(threshold) = args.threshold {
        config.min_acceptable_score = threshold;
    }
    if let Some(task) = args.task {
        config.candidate_set = task;
    }

    config.validate()?;
    Ok(config)
}

/// Train all candidates and persist the winner.
fn cmd_train(args: TrainArgs) -> Result<()> {
    let config = build_config(&args)?;

    let (train, test) = match (&args.train, &args.test, &args.data) {
        (Some(train), Some(test), _) => (load_matrix(train)?, load_matrix(test)?),
        (_, _, Some(data)) => {
            let combined = load_matrix(data)?;
            train_test_split(&combined, args.test_ratio, args.split_seed)?
        }
        _ => {
            return Err(TrainerError::InvalidInput(
                "pass --train and --test, or --data".to_string(),
            ));
        }
    };
    info!(
        train_rows = train.nrows(),
        test_rows = test.nrows(),
        task = ?config.candidate_set,
        "Loaded input data"
    );

    let threshold = config.min_acceptable_score;
    let trainer = ModelTrainer::new(config);
    let outcome = trainer.initiate(&train, &test)?;

    print_leaderboard(&outcome.scores, threshold);
    print_outcome(&outcome);

    if let Some(path) = &args.scores_csv {
        write_scores_csv(&outcome.scores, path)?;
        println!("Scores written to {}", path.display());
    }
    if let Some(path) = &args.summary_json {
        write_summary_json(&outcome, threshold, path)?;
        println!("Summary written to {}", path.display());
    }

    println!("{:.6}", outcome.final_score);
    Ok(())
}

/// Load a saved model and print one prediction per input row.
fn cmd_predict(artifact_path: &Path, input: &Path) -> Result<()> {
    let artifact: ModelArtifact<Model> = load_artifact(artifact_path)?;
    info!(
        model = %artifact.model_name,
        test_score = artifact.test_score,
        "Loaded model artifact"
    );

    let features = load_matrix(input)?;
    let predictions = artifact
        .model
        .predict(features.view())
        .map_err(|e| TrainerError::Artifact(format!("prediction failed: {}", e)))?;

    print_predictions(predictions.view());
    Ok(())
}
