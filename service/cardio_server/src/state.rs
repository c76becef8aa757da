use cardio_model::{default_search_dirs, resolve_artifact_path, DEFAULT_ARTIFACT_FILE};
use cardio_risk::{RiskScorer, ScoreError};
use std::path::Path;
use std::sync::Arc;

/// The scorer loaded at startup, or the reason it could not be.
#[derive(Debug, Clone)]
pub enum ScorerSlot {
    Ready(Arc<RiskScorer>),
    Unavailable { reason: String },
}

impl ScorerSlot {
    pub fn get(&self) -> Result<&RiskScorer, ScoreError> {
        match self {
            ScorerSlot::Ready(s) => Ok(s),
            ScorerSlot::Unavailable { reason } => {
                Err(ScoreError::ArtifactUnavailable(reason.clone()))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ScorerSlot::Ready(_))
    }
}

impl From<RiskScorer> for ScorerSlot {
    fn from(s: RiskScorer) -> Self {
        ScorerSlot::Ready(Arc::new(s))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub scorer: ScorerSlot,
}

impl AppState {
    pub fn new(scorer: impl Into<ScorerSlot>) -> Arc<Self> {
        Arc::new(Self {
            scorer: scorer.into(),
        })
    }
}

/// Loads the artifact once. A failure is logged and recorded in the slot so
/// the service can still start and report it per request.
pub fn load_scorer(explicit: Option<&Path>) -> ScorerSlot {
    let loaded = resolve_artifact_path(explicit, DEFAULT_ARTIFACT_FILE, &default_search_dirs())
        .and_then(RiskScorer::load_model);
    match loaded {
        Ok(scorer) => {
            log::info!(
                "model {} ({}) ready",
                scorer.model_name(),
                scorer.backend_name()
            );
            scorer.into()
        }
        Err(e) => {
            log::error!("model artifact failed to load: {e}");
            ScorerSlot::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
