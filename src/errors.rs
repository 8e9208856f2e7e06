use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::envelope::Envelope;
use crate::state::store::StoreError;

/// Failures surfaced to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Required field missing or empty on create.
    #[error("{0}")]
    Validation(String),

    /// Id does not resolve to a record.
    #[error("{0}")]
    NotFound(String),

    /// No route for this method and path.
    #[error("Not Found")]
    RouteNotFound,

    /// Body is not a UTF-8 JSON object.
    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    /// Anything else that went wrong while handling the request.
    #[error("Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            not_found @ StoreError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        Envelope::failure(status, self.to_string()).into_response()
    }
}

/// Failures while loading `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MalformedBody("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_conversion() {
        let err = ApiError::from(StoreError::NotFound { label: "Task", id: 7 });
        assert_eq!(err, ApiError::NotFound("Task not found".to_string()));

        let err = ApiError::from(StoreError::Validation("Name is required".into()));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::RouteNotFound.to_string(), "Not Found");
        assert_eq!(ApiError::Internal("boom".into()).to_string(), "Server Error: boom");
    }
}
