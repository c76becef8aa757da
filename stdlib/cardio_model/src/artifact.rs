//! Model artifact bundle: metadata, classifier and scaler in one JSON document

use crate::backend::{BackendError, Classifier};
use crate::backends::ClassifierArtifact;
use crate::metadata::ModelMetadata;
use crate::scaler::StandardScaler;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when no explicit artifact path is configured.
pub const DEFAULT_ARTIFACT_FILE: &str = "cardio_model.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("model artifact not found; searched: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<BackendError> for ArtifactError {
    fn from(e: BackendError) -> Self {
        ArtifactError::Invalid(e.to_string())
    }
}

/// A trained classifier together with the scaler it was fit behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub metadata: ModelMetadata,
    pub model: ClassifierArtifact,
    #[serde(default)]
    pub scaler: StandardScaler,
}

impl ModelArtifact {
    pub fn new(metadata: ModelMetadata, model: ClassifierArtifact, scaler: StandardScaler) -> Self {
        Self {
            metadata,
            model,
            scaler,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&s).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.validate()?;
        log::info!(
            "loaded model artifact {} v{} ({}, {} features) from {}",
            artifact.metadata.name,
            artifact.metadata.version,
            artifact.model.backend_name(),
            artifact.model.n_features(),
            path.display()
        );
        Ok(artifact)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Widths of model, scaler and feature names must agree.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match &self.model {
            ClassifierArtifact::LogisticRegression(m) => m.validate()?,
        }
        self.scaler.validate()?;
        let width = self.model.n_features();
        if self.scaler.width() != width {
            return Err(ArtifactError::Invalid(format!(
                "model expects {} features but scaler has {}",
                width,
                self.scaler.width()
            )));
        }
        let names = &self.metadata.feature_names;
        if !names.is_empty() && names.len() != width {
            return Err(ArtifactError::Invalid(format!(
                "model expects {} features but metadata names {}",
                width,
                names.len()
            )));
        }
        Ok(())
    }
}

/// Directories probed for the artifact when no explicit path is given:
/// the working directory, `models/` beneath it, and the executable's
/// directory and its parent.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join("models"));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        if let Some(parent) = exe_dir.parent() {
            dirs.push(parent.to_path_buf());
        }
        dirs.push(exe_dir);
    }
    dirs
}

/// Picks the artifact path: `explicit` wins, otherwise the first
/// `<dir>/<file_name>` that exists.
pub fn resolve_artifact_path(
    explicit: Option<&Path>,
    file_name: &str,
    search_dirs: &[PathBuf],
) -> Result<PathBuf, ArtifactError> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    let candidates: Vec<PathBuf> = search_dirs.iter().map(|d| d.join(file_name)).collect();
    for c in &candidates {
        log::debug!("probing for model artifact at {}", c.display());
        if c.is_file() {
            return Ok(c.clone());
        }
    }
    Err(ArtifactError::NotFound {
        searched: candidates,
    })
}
