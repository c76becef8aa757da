use crate::scorer::ScoredResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskStratum {
    Low,
    High,
}

impl std::fmt::Display for RiskStratum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskStratum::Low => f.write_str("low"),
            RiskStratum::High => f.write_str("high"),
        }
    }
}

/// High when the disease flag is set or the risk exceeds 50%.
pub fn stratify_risk(result: &ScoredResult) -> RiskStratum {
    if result.has_disease || result.risk_percentage > 50.0 {
        RiskStratum::High
    } else {
        RiskStratum::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(class: u8, probability: f64) -> ScoredResult {
        ScoredResult {
            prediction_class: class,
            probability,
            risk_percentage: probability * 100.0,
            has_disease: class == 1,
        }
    }

    #[test]
    fn stratification_thresholds_are_deterministic() {
        assert_eq!(stratify_risk(&result(0, 0.1)), RiskStratum::Low);
        assert_eq!(stratify_risk(&result(0, 0.5)), RiskStratum::Low);
        assert_eq!(stratify_risk(&result(0, 0.51)), RiskStratum::High);
        assert_eq!(stratify_risk(&result(1, 0.3)), RiskStratum::High);
    }
}
