mod persistence;

pub use persistence::{load_artifact, save_artifact, ModelArtifact, ARTIFACT_FORMAT_VERSION};
