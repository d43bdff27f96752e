// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod formatter;
pub mod metrics;

pub use errors::{ApiError, ErrorResponse};
pub use formatter::{ErrorResponseFormatter, Outcome, ResponseSink};
