//! Feature derivation and the fixed 13-column model input layout

use crate::record::ClinicalRecord;

pub const FEATURE_COUNT: usize = 13;

/// Column order the scaler and the classifier were fit on. Never reorder.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "age_years",
    "bmi",
    "map",
];

/// `weight / (height_m)^2`. Callers must ensure `height_cm > 0`.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// `(systolic + 2 * diastolic) / 3`
pub fn mean_arterial_pressure(ap_hi: f64, ap_lo: f64) -> f64 {
    (ap_hi + 2.0 * ap_lo) / 3.0
}

/// Raw (unscaled) model input in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_record(r: &ClinicalRecord) -> Self {
        let bmi = body_mass_index(r.weight, f64::from(r.height));
        let map = mean_arterial_pressure(f64::from(r.ap_hi), f64::from(r.ap_lo));
        Self([
            f64::from(r.gender),
            f64::from(r.height),
            r.weight,
            f64::from(r.ap_hi),
            f64::from(r.ap_lo),
            f64::from(r.cholesterol),
            f64::from(r.gluc),
            f64::from(r.smoke),
            f64::from(r.alco),
            f64::from(r.active),
            f64::from(r.age),
            bmi,
            map,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Name of the first non-finite entry, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.0
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| FEATURE_NAMES[i])
    }
}
