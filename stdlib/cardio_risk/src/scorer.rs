use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::record::{ClinicalRecord, ValidationError};
use crate::rules::{apply_lab_override, ClassifierOutput};
use cardio_model::{ArtifactError, BackendError, Classifier, ModelArtifact, StandardScaler};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("model artifact unavailable: {0}")]
    ArtifactUnavailable(String),
    #[error("scoring failed: {0}")]
    Computation(String),
}

impl From<BackendError> for ScoreError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::LoadError(msg) => ScoreError::ArtifactUnavailable(msg),
            other => ScoreError::Computation(other.to_string()),
        }
    }
}

/// Final response for one scored record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub prediction_class: u8,
    pub probability: f64,
    pub risk_percentage: f64,
    pub has_disease: bool,
}

impl From<ClassifierOutput> for ScoredResult {
    fn from(out: ClassifierOutput) -> Self {
        Self {
            prediction_class: out.class,
            probability: out.probability,
            risk_percentage: out.probability * 100.0,
            has_disease: out.class == 1,
        }
    }
}

/// Cardiovascular risk scorer: derive features, standardize, classify,
/// then apply the lab-value override.
///
/// Holds only read-only state, so one instance can be shared behind an
/// `Arc` by any number of concurrent callers.
#[derive(Clone)]
pub struct RiskScorer {
    classifier: Arc<dyn Classifier>,
    scaler: StandardScaler,
    model_name: String,
}

impl std::fmt::Debug for RiskScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskScorer")
            .field("model_name", &self.model_name)
            .field("backend", &self.classifier.backend_name())
            .finish()
    }
}

impl RiskScorer {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        scaler: StandardScaler,
        model_name: impl Into<String>,
    ) -> Result<Self, ArtifactError> {
        scaler.validate()?;
        if scaler.width() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid(format!(
                "scaler has {} features, expected {FEATURE_COUNT}",
                scaler.width()
            )));
        }
        if classifier.n_features() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid(format!(
                "classifier expects {} features, expected {FEATURE_COUNT}",
                classifier.n_features()
            )));
        }
        Ok(Self {
            classifier,
            scaler,
            model_name: model_name.into(),
        })
    }

    /// Builds a scorer from a loaded bundle. Named feature columns, when the
    /// artifact carries them, must match [`FEATURE_NAMES`] position for position.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        let names = &artifact.metadata.feature_names;
        let in_order = names.iter().map(String::as_str).eq(FEATURE_NAMES.iter().copied());
        if !names.is_empty() && !in_order {
            return Err(ArtifactError::Invalid(format!(
                "artifact feature order {names:?} does not match {FEATURE_NAMES:?}"
            )));
        }
        let ModelArtifact {
            metadata,
            model,
            scaler,
        } = artifact;
        Self::new(Arc::new(model), scaler, metadata.name)
    }

    pub fn load_model(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Self::from_artifact(ModelArtifact::load(path)?)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn backend_name(&self) -> &str {
        self.classifier.backend_name()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Classifier output for an already-validated record, before the override.
    pub fn classify(&self, record: &ClinicalRecord) -> Result<ClassifierOutput, ScoreError> {
        let features = FeatureVector::from_record(record);
        if let Some(name) = features.first_non_finite() {
            return Err(ScoreError::Computation(format!(
                "derived feature {name} is not finite"
            )));
        }
        let scaled = self.scaler.transform(features.as_slice())?;
        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(ScoreError::Computation(
                "standardized features are not finite".into(),
            ));
        }

        let class = self.classifier.predict(&scaled)?;
        let probability = self.classifier.predict_proba(&scaled)?;
        if class > 1 {
            return Err(ScoreError::Computation(format!(
                "classifier returned class {class}"
            )));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ScoreError::Computation(format!(
                "classifier returned probability {probability}"
            )));
        }
        Ok(ClassifierOutput { class, probability })
    }

    pub fn score(&self, record: &ClinicalRecord) -> Result<ScoredResult, ScoreError> {
        record.validate()?;
        let raw = self.classify(record)?;
        let adjusted = apply_lab_override(record, raw);
        log::debug!(
            "scored record with {}: raw {:?} -> {:?}",
            self.model_name,
            raw,
            adjusted
        );
        Ok(ScoredResult::from(adjusted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_model::{ClassifierArtifact, LogisticRegression, ModelMetadata, ModelVersion};

    struct Fixed {
        class: u8,
        probability: f64,
    }

    impl Classifier for Fixed {
        fn predict_proba(&self, _features: &[f64]) -> Result<f64, BackendError> {
            Ok(self.probability)
        }

        fn predict(&self, _features: &[f64]) -> Result<u8, BackendError> {
            Ok(self.class)
        }

        fn backend_name(&self) -> &str {
            "fixed"
        }

        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }
    }

    fn scorer(class: u8, probability: f64) -> RiskScorer {
        RiskScorer::new(
            Arc::new(Fixed { class, probability }),
            StandardScaler::cardio(),
            "fixed",
        )
        .unwrap()
    }

    fn record() -> ClinicalRecord {
        ClinicalRecord {
            age: 50,
            gender: 1,
            height: 160,
            weight: 60.0,
            ap_hi: 115,
            ap_lo: 75,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
        }
    }

    #[test]
    fn result_fields_are_consistent() {
        let r = scorer(1, 0.73).score(&record()).unwrap();
        assert_eq!(r.prediction_class, 1);
        assert!(r.has_disease);
        assert_eq!(r.probability, 0.73);
        assert_eq!(r.risk_percentage, 0.73 * 100.0);
    }

    #[test]
    fn invalid_record_never_reaches_classifier() {
        let mut r = record();
        r.height = 0;
        let err = scorer(0, 0.2).score(&r).unwrap_err();
        assert!(matches!(err, ScoreError::Validation(_)));
    }

    #[test]
    fn out_of_range_probability_is_computation_error() {
        let err = scorer(1, 1.5).score(&record()).unwrap_err();
        assert!(matches!(err, ScoreError::Computation(_)));
        let err = scorer(0, f64::NAN).score(&record()).unwrap_err();
        assert!(matches!(err, ScoreError::Computation(_)));
    }

    #[test]
    fn non_binary_class_is_computation_error() {
        let err = scorer(2, 0.9).score(&record()).unwrap_err();
        assert!(matches!(err, ScoreError::Computation(_)));
    }

    #[test]
    fn backend_load_error_maps_to_unavailable() {
        let e: ScoreError = BackendError::LoadError("not loaded".into()).into();
        assert!(matches!(e, ScoreError::ArtifactUnavailable(_)));
        let e: ScoreError = BackendError::InferenceError("boom".into()).into();
        assert!(matches!(e, ScoreError::Computation(_)));
    }

    #[test]
    fn wrong_width_model_is_rejected() {
        let artifact = ModelArtifact::new(
            ModelMetadata::new("narrow", ModelVersion::new(1, 0, 0)),
            ClassifierArtifact::LogisticRegression(LogisticRegression::new(vec![1.0; 2], 0.0)),
            StandardScaler::new(vec![0.0; 2], vec![1.0; 2]).unwrap(),
        );
        let err = RiskScorer::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid(_)));
    }

    fn flat_artifact(names: Vec<&str>) -> ModelArtifact {
        ModelArtifact::new(
            ModelMetadata::new("named", ModelVersion::new(1, 0, 0)).with_feature_names(names),
            ClassifierArtifact::LogisticRegression(LogisticRegression::new(
                vec![0.0; FEATURE_COUNT],
                0.0,
            )),
            StandardScaler::cardio(),
        )
    }

    #[test]
    fn reordered_feature_columns_are_rejected() {
        let mut reversed = FEATURE_NAMES.to_vec();
        reversed.reverse();
        let err = RiskScorer::from_artifact(flat_artifact(reversed)).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid(_)));

        let mut swapped = FEATURE_NAMES.to_vec();
        swapped.swap(3, 4);
        assert!(RiskScorer::from_artifact(flat_artifact(swapped)).is_err());
    }

    #[test]
    fn matching_or_absent_feature_names_are_accepted() {
        assert!(RiskScorer::from_artifact(flat_artifact(FEATURE_NAMES.to_vec())).is_ok());
        assert!(RiskScorer::from_artifact(flat_artifact(Vec::new())).is_ok());
    }

    #[test]
    fn zero_weight_logistic_model_scores_even_odds() {
        let artifact = ModelArtifact::new(
            ModelMetadata::new("flat", ModelVersion::new(1, 0, 0)),
            ClassifierArtifact::LogisticRegression(LogisticRegression::new(
                vec![0.0; FEATURE_COUNT],
                0.0,
            )),
            StandardScaler::cardio(),
        );
        let s = RiskScorer::from_artifact(artifact).unwrap();
        assert_eq!(s.model_name(), "flat");
        assert_eq!(s.backend_name(), "logistic_regression");
        let r = s.score(&record()).unwrap();
        assert_eq!(r.probability, 0.5);
        assert_eq!(r.prediction_class, 1);
    }
}
