use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::trainer::{ScoreReport, TrainingOutcome};

/// Truncate a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write the ranked scores to a CSV file.
pub fn write_scores_csv(report: &ScoreReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["rank", "model", "score"])?;
    for (i, entry) in report.ranked().iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            entry.name.clone(),
            format!("{:.6}", entry.score),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a summary of the run to a JSON file with truncated floats.
pub fn write_summary_json(outcome: &TrainingOutcome, threshold: f64, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "model_name": outcome.model_name,
        "best_score": truncate(outcome.best_score, 6),
        "final_score": truncate(outcome.final_score, 6),
        "threshold": threshold,
        "artifact_path": outcome.artifact_path.display().to_string(),
        "scores": outcome.scores.iter().map(|entry| {
            serde_json::json!({
                "model": entry.name,
                "score": truncate(entry.score, 6),
                "accepted": entry.score >= threshold,
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}
