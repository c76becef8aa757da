//! Offline `predict` and `inspect` subcommands

use cardio_model::{
    default_search_dirs, resolve_artifact_path, ArtifactError, Classifier, ModelArtifact,
    DEFAULT_ARTIFACT_FILE,
};
use cardio_risk::{
    stratify_risk, ClinicalRecord, RiskScorer, ScoreError, ScoredResult, FEATURE_NAMES,
};
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

pub fn load_artifact(explicit: Option<&Path>) -> Result<(PathBuf, ModelArtifact), CommandError> {
    let path = resolve_artifact_path(explicit, DEFAULT_ARTIFACT_FILE, &default_search_dirs())?;
    let artifact = ModelArtifact::load(&path)?;
    Ok((path, artifact))
}

/// Reads one record from `input`, or stdin when `None`.
pub fn read_record(input: Option<&Path>) -> Result<ClinicalRecord, CommandError> {
    let text = match input {
        Some(p) => std::fs::read_to_string(p).map_err(|source| CommandError::Io {
            what: p.display().to_string(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CommandError::Io {
                    what: "stdin".into(),
                    source,
                })?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn predict(
    scorer: &RiskScorer,
    record: &ClinicalRecord,
    as_json: bool,
) -> Result<String, CommandError> {
    let result = scorer.score(record)?;
    if as_json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(render_prediction(&result))
    }
}

pub fn render_prediction(r: &ScoredResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "prediction_class: {}", r.prediction_class);
    let _ = writeln!(out, "probability:      {:.4}", r.probability);
    let _ = writeln!(out, "risk_percentage:  {:.1}%", r.risk_percentage);
    let _ = writeln!(out, "has_disease:      {}", r.has_disease);
    let _ = writeln!(out, "risk_level:       {}", stratify_risk(r));
    out
}

/// Artifact summary plus the per-feature mean / standard deviation table.
pub fn render_inspect(path: &Path, artifact: &ModelArtifact) -> String {
    let meta = &artifact.metadata;
    let mut out = String::new();
    let _ = writeln!(out, "artifact:  {}", path.display());
    let _ = writeln!(out, "model:     {} v{}", meta.name, meta.version);
    if let Some(d) = &meta.description {
        let _ = writeln!(out, "about:     {d}");
    }
    if let Some(t) = &meta.trained_at {
        let _ = writeln!(out, "trained:   {t}");
    }
    let _ = writeln!(
        out,
        "backend:   {} ({} features)",
        artifact.model.backend_name(),
        artifact.model.n_features()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<15} | {:<15} | {:<15}", "Feature", "Mean", "Std Dev");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for i in 0..artifact.scaler.width() {
        let name = meta
            .feature_names
            .get(i)
            .map(String::as_str)
            .or_else(|| FEATURE_NAMES.get(i).copied())
            .unwrap_or("?");
        let _ = writeln!(
            out,
            "{:<15} | {:<15.4} | {:<15.4}",
            name,
            artifact.scaler.mean[i],
            artifact.scaler.std_dev(i).unwrap_or(f64::NAN)
        );
    }
    out
}
