use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

/// Raw error value stored in the response extensions for the error handler
#[derive(Debug, Clone)]
pub struct RaisedError(pub Value);

/// Application error raised by handlers
///
/// Carries the error value the error handler middleware formats. Without that
/// middleware the framework default applies: the bare status and an empty body.
#[derive(Debug, Clone, Error)]
#[error("request failed with {}", describe(.0))]
pub struct ApiError(Value);

fn describe(value: &Value) -> String {
    match value.get("status") {
        Some(status) => format!("status {status}"),
        None => value.to_string(),
    }
}

impl ApiError {
    /// Raise an arbitrary value, structured or not.
    ///
    /// The builder methods below leave a non-object value untouched.
    pub fn raw(value: Value) -> Self {
        Self(value)
    }

    pub fn with_status(status: u16) -> Self {
        Self(json!({ "status": status }))
    }

    pub fn bad_request(field: impl Into<String>) -> Self {
        Self(json!({ "status": 400, "field": field.into() }))
    }

    pub fn unauthorized() -> Self {
        Self::with_status(401)
    }

    pub fn forbidden() -> Self {
        Self::with_status(403)
    }

    pub fn not_found() -> Self {
        Self::with_status(404)
    }

    pub fn internal() -> Self {
        Self::with_status(500)
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        self.set("message", Value::from(message.into()))
    }

    pub fn status_message(self, status_message: impl Into<String>) -> Self {
        self.set("statusMessage", Value::from(status_message.into()))
    }

    pub fn field_message(self, field_message: impl Into<String>) -> Self {
        self.set("fieldMessage", Value::from(field_message.into()))
    }

    /// Attach an extra member merged into the response body
    pub fn extra(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Builders only touch object values; a raw non-object error is kept as raised.
    fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Value::Object(object) = &mut self.0 {
            object.insert(key.into(), value);
        }
        self
    }

    /// Status of the framework default response
    fn fallback_status(&self) -> StatusCode {
        self.0
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<Value> for ApiError {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.fallback_status().into_response();
        response.extensions_mut().insert(RaisedError(self.0));
        response
    }
}
