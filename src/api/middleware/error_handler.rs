use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::handlers::AppState;
use crate::errors::RaisedError;
use crate::formatter::{AxumResponseSink, Outcome};
use crate::metrics::{REST_ERRORS_FORMATTED_TOTAL, REST_ERRORS_FORWARDED_TOTAL};

/// Error handling middleware
///
/// Picks up errors raised through [`crate::errors::ApiError`] and rewrites the
/// response into the canonical JSON body. Errors the formatter declines keep
/// the framework default response.
pub async fn rest_error_handler(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(RaisedError(error)) = response.extensions_mut().remove::<RaisedError>() else {
        return response;
    };

    let mut sink = AxumResponseSink::new();
    match state.formatter.dispatch(error, &mut sink) {
        Outcome::Handled { code } => {
            REST_ERRORS_FORMATTED_TOTAL
                .with_label_values(&[&code.to_string()])
                .inc();
            sink.into_response()
        }
        Outcome::Forwarded { error, reason } => {
            REST_ERRORS_FORWARDED_TOTAL
                .with_label_values(&[reason.as_str()])
                .inc();
            response.extensions_mut().insert(RaisedError(error));
            response
        }
    }
}
