//! Lab-value override applied on top of the classifier output

use crate::record::ClinicalRecord;
use serde::{Deserialize, Serialize};

/// Cholesterol/glucose category code for "well above normal".
pub const LAB_WELL_ABOVE_NORMAL: i32 = 3;
/// Raw probabilities below this are eligible for the override.
pub const OVERRIDE_TRIGGER_BELOW: f64 = 0.5;
/// Minimum probability reported once the override fires.
pub const OVERRIDE_PROBABILITY_FLOOR: f64 = 0.55;

/// Class label and positive-class probability as produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub class: u8,
    pub probability: f64,
}

pub fn lab_override_triggered(record: &ClinicalRecord) -> bool {
    record.cholesterol == LAB_WELL_ABOVE_NORMAL || record.gluc == LAB_WELL_ABOVE_NORMAL
}

/// Escalates a low-probability output to high risk when either lab value is
/// well above normal. Only ever raises class and probability.
pub fn apply_lab_override(record: &ClinicalRecord, raw: ClassifierOutput) -> ClassifierOutput {
    if lab_override_triggered(record) && raw.probability < OVERRIDE_TRIGGER_BELOW {
        log::debug!(
            "lab override: cholesterol={} gluc={} raw probability {:.4} raised to {}",
            record.cholesterol,
            record.gluc,
            raw.probability,
            OVERRIDE_PROBABILITY_FLOOR
        );
        ClassifierOutput {
            class: 1,
            probability: raw.probability.max(OVERRIDE_PROBABILITY_FLOOR),
        }
    } else {
        raw
    }
}
