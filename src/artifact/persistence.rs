use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, TrainerError};

/// Version written into every artifact; bumped on incompatible layout changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// The persisted form of exactly one fitted estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact<E> {
    pub format_version: u32,
    pub model_name: String,
    /// Score the model reached on the test split when it was selected.
    pub test_score: f64,
    pub model: E,
}

impl<E> ModelArtifact<E> {
    pub fn new(model_name: impl Into<String>, test_score: f64, model: E) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_name: model_name.into(),
            test_score,
            model,
        }
    }
}

/// Write an artifact as JSON, creating parent directories.
///
/// The JSON goes to a temporary file in the target directory which then
/// replaces `path`, so readers never observe a partially written artifact.
pub fn save_artifact<E: Serialize>(path: &Path, artifact: &ModelArtifact<E>) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(artifact)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read an artifact written by `save_artifact`.
pub fn load_artifact<E: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<ModelArtifact<E>> {
    let content = fs::read_to_string(path)?;
    let artifact: ModelArtifact<E> = serde_json::from_str(&content)?;

    if artifact.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(TrainerError::Artifact(format!(
            "unsupported format version {} (expected {})",
            artifact.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }
    Ok(artifact)
}
