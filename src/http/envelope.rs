use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Uniform JSON wrapper for every response:
///
/// ```json
/// { "message": "Task created", "data": { "id": 3, "title": "..." } }
/// ```
///
/// Failures carry `data: null` plus an `error` field holding the status
/// reason (`"Not Found"`, `"Bad Request"`, ...).
#[derive(Debug, Serialize)]
pub struct Envelope<T = Value> {
    #[serde(skip)]
    status: StatusCode,
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// 200 with `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    /// 201 with the created `data`.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }
}

impl Envelope<Value> {
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
            error: Some(status.canonical_reason().unwrap_or("Error")),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let envelope = Envelope::created("Task created", json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "message": "Task created", "data": { "id": 1 } })
        );
        assert_eq!(envelope.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn test_failure_shape() {
        let envelope = Envelope::failure(StatusCode::NOT_FOUND, "Not Found");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "message": "Not Found", "data": null, "error": "Not Found" })
        );
    }

    #[test]
    fn test_content_type_is_json() {
        let response = Envelope::ok("All users", json!([])).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
