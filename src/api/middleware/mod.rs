pub mod error_handler;
pub mod logging;

pub use error_handler::rest_error_handler;
pub use logging::logging_middleware;
