use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardio_risk::ScoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("malformed request body: {}", .0.body_text())]
    Payload(#[from] JsonRejection),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Score(ScoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Score(ScoreError::ArtifactUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Score(ScoreError::Computation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Payload(rejection) => rejection.status(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Score(ScoreError::Validation(_)) => "validation_error",
            ApiError::Score(ScoreError::ArtifactUnavailable(_)) => "artifact_unavailable",
            ApiError::Score(ScoreError::Computation(_)) => "computation_error",
            ApiError::Payload(_) => "invalid_payload",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            log::error!("predict failed ({status}): {message}");
        } else {
            log::debug!("rejected request ({status}): {message}");
        }

        let mut error = json!({
            "type": self.error_type(),
            "message": message,
            "status": status.as_u16(),
        });
        if let ApiError::Score(ScoreError::Validation(v)) = &self {
            error["fields"] = json!(v.violations);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
