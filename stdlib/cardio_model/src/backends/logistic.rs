//! Logistic regression backend: p = sigmoid(W·x + b)

use crate::backend::{check_width, BackendError, Classifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Raw decision value `W·x + b` before the sigmoid.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, BackendError> {
        check_width(self.coefficients.len(), features)?;
        let logit = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;
        if !logit.is_finite() {
            return Err(BackendError::InferenceError(format!(
                "non-finite decision value {logit}"
            )));
        }
        Ok(logit)
    }

    pub(crate) fn validate(&self) -> Result<(), BackendError> {
        if self.coefficients.is_empty() {
            return Err(BackendError::LoadError(
                "logistic regression has no coefficients".into(),
            ));
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(BackendError::LoadError(format!(
                "coefficient {i} is not finite"
            )));
        }
        if !self.intercept.is_finite() {
            return Err(BackendError::LoadError("intercept is not finite".into()));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp() never overflows.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, BackendError> {
        let z = self.decision_function(features)?;
        Ok(sigmoid(z))
    }

    fn backend_name(&self) -> &str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}
