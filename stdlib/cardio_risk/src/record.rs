use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One patient's raw clinical and lifestyle inputs.
///
/// Categorical fields keep their integer codes as submitted:
/// `gender` 1 = female, 2 = male; `cholesterol` and `gluc` 1 = normal,
/// 2 = above normal, 3 = well above normal; `smoke`, `alco` and `active`
/// are 0/1 flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Age in whole years
    pub age: i32,
    pub gender: i32,
    /// Height in centimetres
    pub height: i32,
    /// Weight in kilograms
    pub weight: f64,
    /// Systolic blood pressure
    pub ap_hi: i32,
    /// Diastolic blood pressure
    pub ap_lo: i32,
    pub cholesterol: i32,
    pub gluc: i32,
    pub smoke: i32,
    pub alco: i32,
    pub active: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field of a record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid clinical record: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn join_violations(v: &[FieldViolation]) -> String {
    v.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }
}

fn check_code(
    out: &mut Vec<FieldViolation>,
    field: &'static str,
    value: i32,
    allowed: &[i32],
) {
    if !allowed.contains(&value) {
        out.push(FieldViolation {
            field,
            message: format!("must be one of {allowed:?}, got {value}"),
        });
    }
}

impl ClinicalRecord {
    /// Rejects out-of-domain values before any arithmetic runs.
    ///
    /// Blood pressures are not range-checked and not checked against each
    /// other.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.age < 0 {
            violations.push(FieldViolation {
                field: "age",
                message: format!("must not be negative, got {}", self.age),
            });
        }
        check_code(&mut violations, "gender", self.gender, &[1, 2]);
        if self.height <= 0 {
            violations.push(FieldViolation {
                field: "height",
                message: format!("must be greater than 0 cm, got {}", self.height),
            });
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            violations.push(FieldViolation {
                field: "weight",
                message: format!("must be a positive number of kg, got {}", self.weight),
            });
        }
        check_code(&mut violations, "cholesterol", self.cholesterol, &[1, 2, 3]);
        check_code(&mut violations, "gluc", self.gluc, &[1, 2, 3]);
        check_code(&mut violations, "smoke", self.smoke, &[0, 1]);
        check_code(&mut violations, "alco", self.alco, &[0, 1]);
        check_code(&mut violations, "active", self.active, &[0, 1]);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}
