use crate::error::ApiError;
use crate::state::{AppState, ScorerSlot};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use cardio_risk::{ClinicalRecord, ScoredResult};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const HOME_MESSAGE: &str = "Cardiovascular Disease Prediction API is running";
/// Reported by `/health` while degraded; the load error itself is only logged.
pub const UNAVAILABLE_REASON: &str = "model artifact not loaded";

#[derive(Debug, Serialize)]
struct HomeResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

pub fn app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/api/predict", post(predict))
        .layer(cors)
        .with_state(state)
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: HOME_MESSAGE,
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let resp = match &state.scorer {
        ScorerSlot::Ready(s) => HealthResponse {
            status: "ok",
            model_loaded: true,
            model: Some(s.model_name().to_string()),
            reason: None,
        },
        ScorerSlot::Unavailable { .. } => HealthResponse {
            status: "degraded",
            model_loaded: false,
            model: None,
            reason: Some(UNAVAILABLE_REASON),
        },
    };
    Json(resp)
}

async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClinicalRecord>, JsonRejection>,
) -> Result<Json<ScoredResult>, ApiError> {
    let Json(record) = payload?;
    let scorer = state.scorer.get()?;
    let result = scorer.score(&record)?;
    Ok(Json(result))
}
