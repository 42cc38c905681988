//! API error type shared by the REST and GraphQL surfaces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extraction::ExtractionError;
use serde_json::json;
use tracing::error;

/// Errors surfaced to API clients.
///
/// Internal variants keep their source for logging but render as a
/// generic message so upstream details never leak to clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            error!(error = %source, "Request failed with internal error");
        }

        let status = self.status_code();
        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            // The client sent a document with no content.
            ExtractionError::EmptyDocument => {
                ApiError::BadRequest("Uploaded file is empty".to_string())
            }
            // Parsing, configuration, schema, and upstream faults are all
            // server-side; the client gets a generic 500.
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_maps_to_bad_request() {
        let err: ApiError = ExtractionError::EmptyDocument.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Uploaded file is empty");
    }

    #[test]
    fn test_upstream_faults_render_generically() {
        let err: ApiError = ExtractionError::Config("OPENAI_API_KEY missing".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // The configuration detail must not reach the client.
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_pdf_fault_is_internal() {
        let err: ApiError = ExtractionError::Pdf("malformed xref".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
