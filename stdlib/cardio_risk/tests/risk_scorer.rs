use cardio_model::{BackendError, Classifier, StandardScaler};
use cardio_risk::{ClinicalRecord, RiskScorer, ScoreError, FEATURE_COUNT};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// Returns a fixed probability and remembers the last standardized input.
struct Probe {
    probability: f64,
    seen: Mutex<Vec<f64>>,
}

impl Probe {
    fn new(probability: f64) -> Arc<Self> {
        Arc::new(Self {
            probability,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl Classifier for Probe {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, BackendError> {
        *self.seen.lock().unwrap() = features.to_vec();
        Ok(self.probability)
    }

    fn backend_name(&self) -> &str {
        "probe"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }
}

fn scorer(probe: Arc<Probe>) -> RiskScorer {
    RiskScorer::new(probe, StandardScaler::cardio(), "probe").unwrap()
}

fn reference_patient(cholesterol: i32, gluc: i32) -> ClinicalRecord {
    ClinicalRecord {
        age: 55,
        gender: 2,
        height: 175,
        weight: 85.0,
        ap_hi: 120,
        ap_lo: 80,
        cholesterol,
        gluc,
        smoke: 1,
        alco: 1,
        active: 0,
    }
}

#[test]
fn high_lab_values_escalate_low_raw_probability() {
    let s = scorer(Probe::new(0.31));
    let r = s.score(&reference_patient(3, 3)).unwrap();
    assert!(r.probability >= 0.55);
    assert_eq!(r.prediction_class, 1);
    assert!(r.has_disease);
    assert_eq!(r.risk_percentage, r.probability * 100.0);
}

#[test]
fn normal_lab_values_pass_classifier_output_through() {
    let s = scorer(Probe::new(0.31));
    let raw = s.classify(&reference_patient(1, 1)).unwrap();
    let r = s.score(&reference_patient(1, 1)).unwrap();
    assert_eq!(r.prediction_class, raw.class);
    assert_eq!(r.probability, raw.probability);
    assert_eq!(r.prediction_class, 0);
    assert_eq!(r.probability, 0.31);
    assert!(!r.has_disease);
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let s = scorer(Probe::new(0.42));
    let record = reference_patient(3, 1);
    let a = s.score(&record).unwrap();
    let b = s.score(&record).unwrap();
    assert_eq!(a.probability.to_bits(), b.probability.to_bits());
    assert_eq!(a.risk_percentage.to_bits(), b.risk_percentage.to_bits());
    assert_eq!(a, b);
}

#[test]
fn zero_height_is_a_validation_error() {
    let mut record = reference_patient(1, 1);
    record.height = 0;
    let probe = Probe::new(0.5);
    let err = scorer(probe.clone()).score(&record).unwrap_err();
    match err {
        ScoreError::Validation(v) => assert!(v.fields().any(|f| f == "height")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(probe.seen.lock().unwrap().is_empty());
}

#[test]
fn standardization_matches_documented_constants() {
    let mean = [
        1.34699155e+00,
        1.64402644e+02,
        7.41306556e+01,
        1.26630500e+02,
        8.13068182e+01,
        1.36629516e+00,
        1.22636218e+00,
        8.78496503e-02,
        5.27935606e-02,
        8.04177593e-01,
        5.33058093e+01,
        2.74739237e+01,
        9.64147120e+01,
    ];
    let scale = [
        0.47601304,
        7.96329989,
        14.29615498,
        16.62171395,
        9.45291316,
        0.68068297,
        0.57276343,
        0.28307612,
        0.22362111,
        0.39683245,
        6.76348550,
        5.31133134,
        11.02801243,
    ];
    let bmi = 85.0 / (1.75 * 1.75);
    let map = (120.0 + 2.0 * 80.0) / 3.0;
    let raw = [
        2.0, 175.0, 85.0, 120.0, 80.0, 3.0, 3.0, 1.0, 1.0, 0.0, 55.0, bmi, map,
    ];

    let probe = Probe::new(0.9);
    scorer(probe.clone())
        .score(&reference_patient(3, 3))
        .unwrap();
    let seen = probe.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), FEATURE_COUNT);
    for i in 0..FEATURE_COUNT {
        let expected = (raw[i] - mean[i]) / scale[i];
        assert!(
            (seen[i] - expected).abs() < 1e-9,
            "feature {i}: got {} expected {expected}",
            seen[i]
        );
    }
}

#[test]
fn scorer_is_shareable_across_threads() {
    let s = Arc::new(scorer(Probe::new(0.2)));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let s = Arc::clone(&s);
            std::thread::spawn(move || {
                let gluc = if i % 2 == 0 { 3 } else { 1 };
                s.score(&reference_patient(1, gluc)).unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let r = h.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(r.probability, 0.55);
        } else {
            assert_eq!(r.probability, 0.2);
        }
    }
}
