//! Classifier trait and error types for model inference

use thiserror::Error;

/// Errors that can occur during backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Probability at or above which the positive class is predicted.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// A trained binary classifier over a fixed-width numeric feature vector.
///
/// Implementations are frozen after construction: inference takes `&self`
/// and may be called from many threads at once.
pub trait Classifier: Send + Sync {
    /// Probability of the positive class (label `1`) for one sample.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, BackendError>;

    /// Predicted class label in `{0, 1}`.
    fn predict(&self, features: &[f64]) -> Result<u8, BackendError> {
        let p = self.predict_proba(features)?;
        Ok(u8::from(p >= DECISION_THRESHOLD))
    }

    /// Backend name/identifier
    fn backend_name(&self) -> &str;

    /// Number of input features the model was fit on
    fn n_features(&self) -> usize;
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), BackendError> {
    if features.len() != expected {
        return Err(BackendError::InvalidInput(format!(
            "input length {} != expected {}",
            features.len(),
            expected
        )));
    }
    Ok(())
}
