use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0:#}")]
    Backend(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Backend(e) => {
                tracing::error!("Backend error: {e:#}");
                (StatusCode::BAD_GATEWAY, format!("Backend error: {e:#}"))
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
