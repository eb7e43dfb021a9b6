use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static MARKERS_ADDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("marker_cache_markers_added_total", "Total markers added")
        .expect("register markers_added_total")
});

pub static MARKERS_REMOVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("marker_cache_markers_removed_total", "Total markers removed by delete requests")
        .expect("register markers_removed_total")
});

pub static MARKER_LISTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("marker_cache_list_requests_total", "Total marker list requests")
        .expect("register list_requests_total")
});

pub static VALIDATION_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("marker_cache_validation_rejected_total", "Total marker inputs rejected by validation")
        .expect("register validation_rejected_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("marker_cache_store_errors_total", "Total marker store failures")
        .expect("register store_errors_total")
});

/// Touch every metric so it shows up in the first scrape.
pub fn init_metrics() {
    Lazy::force(&MARKERS_ADDED_TOTAL);
    Lazy::force(&MARKERS_REMOVED_TOTAL);
    Lazy::force(&MARKER_LISTS_TOTAL);
    Lazy::force(&VALIDATION_REJECTED_TOTAL);
    Lazy::force(&STORE_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
