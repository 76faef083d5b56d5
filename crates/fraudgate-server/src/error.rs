//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fraudgate_compiler::CompileError;
use fraudgate_repository::RepositoryError;
use fraudgate_sdk::SdkError;
use serde_json::json;
use thiserror::Error;

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Rule definition rejected by the authoring chain
    #[error("Invalid rule: {0}")]
    InvalidRule(CompileError),

    /// Malformed request body or console
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRule(CompileError::DuplicateRule { .. }) => StatusCode::CONFLICT,
            ServerError::InvalidRule(_) | ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            // Client closed request
            ServerError::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ServerError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::InvalidRule(err) => err.code(),
            ServerError::InvalidRequest(_) => "INVALID_REQUEST",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::Cancelled => "CANCELLED",
            ServerError::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
            ServerError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Compile(err) => ServerError::InvalidRule(err),
            SdkError::Repository(RepositoryError::NotFound { id }) => ServerError::NotFound(id),
            SdkError::InvalidConsole(msg) => ServerError::InvalidRequest(msg),
            SdkError::Cancelled => ServerError::Cancelled,
            SdkError::DeadlineExceeded(operation) => ServerError::DeadlineExceeded(operation),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authoring_errors_are_bad_requests() {
        let err: ServerError = SdkError::Compile(CompileError::MissingScope).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "MISSING_SCOPE");
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let err: ServerError = SdkError::Compile(CompileError::DuplicateRule {
            existing_id: "r1".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "DUPLICATE_RULE");
    }

    #[test]
    fn test_sdk_error_mapping() {
        let not_found: ServerError =
            SdkError::Repository(RepositoryError::NotFound { id: "r9".to_string() }).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let backend: ServerError =
            SdkError::Repository(RepositoryError::Backend("down".to_string())).into();
        assert_eq!(backend.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let cancelled: ServerError = SdkError::Cancelled.into();
        assert_eq!(cancelled.status().as_u16(), 499);

        let deadline: ServerError = SdkError::DeadlineExceeded("company_rules".to_string()).into();
        assert_eq!(deadline.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let server_err: ServerError = anyhow::anyhow!("something went wrong").into();
        assert!(server_err.to_string().contains("Internal error"));
        assert!(server_err.to_string().contains("something went wrong"));
    }
}
