//! Structured error values and the canonical JSON error body

pub mod api_error;
pub mod codes;
pub mod input;
pub mod response;

pub use api_error::{ApiError, RaisedError};
pub use codes::{StatusDefaults, LEGACY_REASON_PHRASE, LEGACY_REASON_PHRASE_STATUS};
pub use input::StructuredError;
pub use response::ErrorResponse;
