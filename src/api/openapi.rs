use utoipa::OpenApi;

use crate::api::handlers::HealthResponse;
use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST Error Handler",
        version = "0.1.0",
        description = "Error formatting middleware that maps structured errors onto a canonical JSON error response.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::raise_error,
        crate::api::handlers::raise_status,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "errors", description = "Endpoints that raise errors through the error handler"),
    )
)]
pub struct ApiDoc;
