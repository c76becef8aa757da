//! Cardiovascular disease risk scoring
//!
//! `ClinicalRecord` → validation → derived features (BMI, mean arterial
//! pressure) → standardization → classifier → lab-value override →
//! `ScoredResult`. Every step is pure; the scorer holds no mutable state.

pub mod features;
pub mod record;
pub mod risk;
pub mod rules;
pub mod scorer;

pub use features::{
    body_mass_index, mean_arterial_pressure, FeatureVector, FEATURE_COUNT, FEATURE_NAMES,
};
pub use record::{ClinicalRecord, FieldViolation, ValidationError};
pub use risk::{stratify_risk, RiskStratum};
pub use rules::{
    apply_lab_override, lab_override_triggered, ClassifierOutput, LAB_WELL_ABOVE_NORMAL,
    OVERRIDE_PROBABILITY_FLOOR, OVERRIDE_TRIGGER_BELOW,
};
pub use scorer::{RiskScorer, ScoreError, ScoredResult};

/// Loads a model artifact from `path` and builds a ready scorer from it.
pub fn load_model(
    path: impl AsRef<std::path::Path>,
) -> Result<RiskScorer, cardio_model::ArtifactError> {
    RiskScorer::load_model(path)
}
