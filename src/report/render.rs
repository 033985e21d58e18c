use ndarray::ArrayView1;

use crate::trainer::{CandidatePool, ScoreReport, TrainingOutcome};

/// Print the scores best first, marking those that clear the threshold.
pub fn print_leaderboard(report: &ScoreReport, threshold: f64) {
    if report.is_empty() {
        println!("No candidates were scored.");
        return;
    }

    println!();
    println!("=== Leaderboard (R², threshold {:.2}) ===", threshold);
    println!();

    let max_name_len = report.iter().map(|e| e.name.len()).max().unwrap_or(10);

    for (i, entry) in report.ranked().iter().enumerate() {
        let mark = if entry.score >= threshold { "ok" } else { "--" };
        println!(
            "{:>3}. {:<width$}  {:>9.4}  {}",
            i + 1,
            entry.name,
            entry.score,
            mark,
            width = max_name_len
        );
    }
    println!();
}

/// Print the winner and where it was saved.
pub fn print_outcome(outcome: &TrainingOutcome) {
    println!("--- Selected ---");
    println!("Model: {}", outcome.model_name);
    println!("Test score: {:.4}", outcome.best_score);
    println!("Final score: {:.4}", outcome.final_score);
    println!("Artifact: {}", outcome.artifact_path.display());
    println!();
}

/// List the candidates in training order.
pub fn print_candidates<E>(pool: &CandidatePool<E>) {
    println!("{} candidates:", pool.len());
    for (i, name) in pool.names().iter().enumerate() {
        println!("{:>3}. {}", i + 1, name);
    }
}

/// One prediction per line.
pub fn print_predictions(predictions: ArrayView1<'_, f64>) {
    for value in predictions {
        println!("{}", value);
    }
}
