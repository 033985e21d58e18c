pub mod output;
pub mod render;

pub use output::{write_scores_csv, write_summary_json};
pub use render::{print_candidates, print_leaderboard, print_outcome, print_predictions};
