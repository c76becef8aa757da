//! Fitted standardization parameters: `(x - mean) / scale` per position

use crate::backend::BackendError;
use serde::{Deserialize, Serialize};

/// Per-feature means of the production cardio training set, in feature order.
const CARDIO_MEAN: [f64; 13] = [
    1.346_991_55e+00,
    1.644_026_44e+02,
    7.413_065_56e+01,
    1.266_305_00e+02,
    8.130_681_82e+01,
    1.366_295_16e+00,
    1.226_362_18e+00,
    8.784_965_03e-02,
    5.279_356_06e-02,
    8.041_775_93e-01,
    5.330_580_93e+01,
    2.747_392_37e+01,
    9.641_471_20e+01,
];

/// Per-feature scales (population standard deviations), in feature order.
const CARDIO_SCALE: [f64; 13] = [
    0.476_013_04,
    7.963_299_89,
    14.296_154_98,
    16.621_713_95,
    9.452_913_16,
    0.680_682_97,
    0.572_763_43,
    0.283_076_12,
    0.223_621_11,
    0.396_832_45,
    6.763_485_50,
    5.311_331_34,
    11.028_012_43,
];

/// A frozen standard scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, BackendError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// The scaler fit alongside the production cardio classifier.
    pub fn cardio() -> Self {
        Self {
            mean: CARDIO_MEAN.to_vec(),
            scale: CARDIO_SCALE.to_vec(),
        }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn std_dev(&self, index: usize) -> Option<f64> {
        self.scale.get(index).copied()
    }

    /// Checks the fit-time invariants: matching lengths and finite, non-zero scales.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.mean.is_empty() {
            return Err(BackendError::LoadError("scaler has no features".into()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(BackendError::LoadError(format!(
                "scaler mean length {} != scale length {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(BackendError::LoadError(format!(
                "scaler mean {i} is not finite"
            )));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(BackendError::LoadError(format!(
                "scaler scale {i} must be finite and non-zero"
            )));
        }
        Ok(())
    }

    pub fn transform(&self, raw: &[f64]) -> Result<Vec<f64>, BackendError> {
        if raw.len() != self.width() {
            return Err(BackendError::InvalidInput(format!(
                "input length {} != scaler width {}",
                raw.len(),
                self.width()
            )));
        }
        Ok(raw
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::cardio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardio_table_is_valid() {
        let s = StandardScaler::cardio();
        assert_eq!(s.width(), 13);
        s.validate().unwrap();
    }

    #[test]
    fn transform_at_mean_is_zero() {
        let s = StandardScaler::cardio();
        let out = s.transform(&CARDIO_MEAN).unwrap();
        assert!(out.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn transform_one_scale_above_mean_is_one() {
        let s = StandardScaler::new(vec![10.0, -2.0], vec![4.0, 0.5]).unwrap();
        let out = s.transform(&[14.0, -1.5]).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = StandardScaler::new(vec![1.0, 2.0], vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, BackendError::LoadError(_)));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(StandardScaler::new(vec![1.0, 2.0], vec![1.0]).is_err());
        let s = StandardScaler::cardio();
        assert!(matches!(
            s.transform(&[0.0; 12]),
            Err(BackendError::InvalidInput(_))
        ));
    }
}
