use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, raise_error, raise_status, AppState};
use super::middleware::{logging_middleware, rest_error_handler};
use super::openapi::ApiDoc;
use crate::metrics;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/errors/raise", post(raise_error))
        .route("/errors/:status", get(raise_status))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route_layer(middleware::from_fn(metrics::middleware::track_metrics))
        // Order matters: the error handler sits inside logging so logged statuses are final
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rest_error_handler,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
