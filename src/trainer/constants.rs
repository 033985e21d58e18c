/// Directory the winning model is written to by default.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// File name of the persisted model inside `DEFAULT_ARTIFACT_DIR`.
pub const DEFAULT_MODEL_FILE_NAME: &str = "model.json";

/// Minimum score the best candidate must reach before it is persisted.
pub const MIN_ACCEPTABLE_SCORE: f64 = 0.6;

/// Default share of rows held out when splitting a single combined file.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Default seed for the row shuffle of a single combined file.
pub const DEFAULT_SPLIT_SEED: u64 = 42;
