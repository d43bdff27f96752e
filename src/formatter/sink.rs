use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hyper::ext::ReasonPhrase;
use tracing::warn;

use crate::errors::ErrorResponse;

/// A not-yet-committed HTTP response the formatter writes into
pub trait ResponseSink {
    /// Whether a response has already been started
    fn headers_sent(&self) -> bool;

    fn status(&mut self, code: u16) -> &mut Self;

    /// Free-text status message annotation
    fn set_status_message(&mut self, message: &str);

    /// Write the body. Terminal.
    fn json(&mut self, body: ErrorResponse);
}

/// Response sink that renders into an axum [`Response`]
#[derive(Debug, Clone)]
pub struct AxumResponseSink {
    status: StatusCode,
    reason: Option<ReasonPhrase>,
    body: Option<ErrorResponse>,
}

impl Default for AxumResponseSink {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            reason: None,
            body: None,
        }
    }
}

impl AxumResponseSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseSink for AxumResponseSink {
    fn headers_sent(&self) -> bool {
        self.body.is_some()
    }

    fn status(&mut self, code: u16) -> &mut Self {
        self.status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    fn set_status_message(&mut self, message: &str) {
        match ReasonPhrase::try_from(message.as_bytes()) {
            Ok(reason) => self.reason = Some(reason),
            Err(_) => warn!(message = %message, "Ignoring invalid reason phrase"),
        }
    }

    fn json(&mut self, body: ErrorResponse) {
        self.body = Some(body);
    }
}

impl IntoResponse for AxumResponseSink {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };
        if let Some(reason) = self.reason {
            response.extensions_mut().insert(reason);
        }
        response
    }
}
