use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::chunker::ChunkError;
use crate::services::llm_provider::ServiceError;
use crate::services::text_extract::DocumentLoadError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidConfiguration(#[from] ChunkError),

    #[error(transparent)]
    DocumentLoad(#[from] DocumentLoadError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidConfiguration(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::DocumentLoad(DocumentLoadError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::DocumentLoad(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Service(e) => {
                tracing::error!("Summarization service error: {e}");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(ErrorResponse {
            error: message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_error_maps_to_bad_request() {
        let err = AppError::from(ChunkError::InvalidConfiguration {
            chunk_size: 4,
            overlap: 4,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_document_maps_to_not_found() {
        let err = AppError::from(DocumentLoadError::NotFound("/tmp/x.pdf".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_service_error_maps_to_bad_gateway() {
        let err = AppError::from(ServiceError::Completion("boom".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
