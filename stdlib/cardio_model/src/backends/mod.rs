//! Classifier implementations that can be stored in a model artifact

pub mod logistic;

pub use logistic::LogisticRegression;

use crate::backend::{BackendError, Classifier};
use serde::{Deserialize, Serialize};

/// Serialized classifier, tagged by `kind` in the artifact document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
}

impl Classifier for ClassifierArtifact {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, BackendError> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.predict_proba(features),
        }
    }

    fn backend_name(&self) -> &str {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.backend_name(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.n_features(),
        }
    }
}
