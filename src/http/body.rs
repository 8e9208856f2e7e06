use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::errors::ApiError;
use crate::state::schema::Record;

/// Request body decoded as a JSON object.
///
/// Unlike `axum::Json` this ignores the `Content-Type` header, treats an
/// empty body as `{}`, and rejects undecodable payloads with
/// [`ApiError::MalformedBody`]. Failing to read the body at all is an
/// [`ApiError::Internal`].
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Record);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Internal(e.body_text()))?;

        decode(&bytes).map(JsonBody)
    }
}

/// Decode a fully buffered payload.
pub fn decode(bytes: &[u8]) -> Result<Record, ApiError> {
    if bytes.is_empty() {
        return Ok(Record::new());
    }

    let text = std::str::from_utf8(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::MalformedBody(format!(
            "expected a JSON object, found {}",
            kind(&other)
        ))),
        Err(e) => Err(ApiError::MalformedBody(e.to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
