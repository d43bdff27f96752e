use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Error handler Metrics
    pub static ref REST_ERRORS_FORMATTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rest_errors_formatted_total",
        "Total errors written as canonical JSON responses",
        &["code"]
    )
    .unwrap();

    pub static ref REST_ERRORS_FORWARDED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rest_errors_forwarded_total",
        "Total errors passed on to the default handler",
        &["reason"]  // reason: headers_sent, not_structured
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    // Force lazy_static initialization
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&HTTP_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&REST_ERRORS_FORMATTED_TOTAL);
    lazy_static::initialize(&REST_ERRORS_FORWARDED_TOTAL);
}
