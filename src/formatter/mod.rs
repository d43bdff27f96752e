//! Maps structured error values onto the canonical JSON error response

pub mod sink;

pub use sink::{AxumResponseSink, ResponseSink};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{
    ErrorResponse, StructuredError, LEGACY_REASON_PHRASE, LEGACY_REASON_PHRASE_STATUS,
};

/// Why an error was passed on to the next handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardReason {
    HeadersSent,
    NotStructured,
}

impl ForwardReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeadersSent => "headers_sent",
            Self::NotStructured => "not_structured",
        }
    }
}

/// Result of a single formatting attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The error was written to the sink with this status
    Handled { code: u16 },
    /// The error is handed back untouched
    Forwarded { error: Value, reason: ForwardReason },
}

#[derive(Debug, Clone)]
pub struct ErrorResponseFormatter {
    legacy_reason_phrase: bool,
}

impl Default for ErrorResponseFormatter {
    fn default() -> Self {
        Self {
            legacy_reason_phrase: true,
        }
    }
}

impl ErrorResponseFormatter {
    pub fn new(legacy_reason_phrase: bool) -> Self {
        Self {
            legacy_reason_phrase,
        }
    }

    /// Format `error` into `sink`, or hand it back.
    ///
    /// Errors are owned once they are a JSON object with a numeric `status`;
    /// from then on a response is always written, unknown codes included.
    pub fn dispatch<S: ResponseSink>(&self, error: Value, sink: &mut S) -> Outcome {
        if sink.headers_sent() {
            warn!("Response already started, forwarding error");
            return Outcome::Forwarded {
                error,
                reason: ForwardReason::HeadersSent,
            };
        }

        let Some(structured) = StructuredError::from_value(&error) else {
            debug!(error = %error, "Error is not structured, forwarding");
            return Outcome::Forwarded {
                error,
                reason: ForwardReason::NotStructured,
            };
        };

        let code = structured.status;
        let body = ErrorResponse::from_structured(&structured);

        sink.status(code);
        if self.legacy_reason_phrase && code == LEGACY_REASON_PHRASE_STATUS {
            let reason = match &structured.status_message {
                Some(Value::String(reason)) => reason.as_str(),
                _ => LEGACY_REASON_PHRASE,
            };
            if !reason.is_empty() {
                sink.set_status_message(reason);
            }
        }

        debug!(code, "Writing error response");
        sink.json(body);

        Outcome::Handled { code }
    }

    /// Continuation-style entry point: `next` runs only for forwarded errors.
    pub fn handle<S, F>(&self, error: Value, sink: &mut S, next: F)
    where
        S: ResponseSink,
        F: FnOnce(Value),
    {
        if let Outcome::Forwarded { error, .. } = self.dispatch(error, sink) {
            next(error);
        }
    }
}
