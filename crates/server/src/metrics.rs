//! Prometheus metrics for the reelay server.
//!
//! Exposes cache effectiveness and upstream call counters. The `/metrics`
//! endpoint is unauthenticated for scraping; restrict it at the
//! infrastructure level when deployed on shared networks.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static CACHE_HITS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "reelay_cache_hits_total",
        "Total listing requests served from the response cache",
    )
    .expect("metric creation failed")
});

pub static CACHE_MISSES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "reelay_cache_misses_total",
        "Total listing requests that missed the response cache",
    )
    .expect("metric creation failed")
});

pub static UPSTREAM_REQUESTS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "reelay_upstream_requests_total",
        "Total outbound calls to the upstream listing API",
    )
    .expect("metric creation failed")
});

pub static UPSTREAM_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "reelay_upstream_failures_total",
        "Total outbound calls that ended in a failure envelope",
    )
    .expect("metric creation failed")
});

pub static VIDEOS_RETURNED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "reelay_videos_returned_total",
        "Total video summaries returned from fresh fetches",
    )
    .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry. Idempotent.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(CACHE_HITS.clone()))
            .expect("failed to register cache hits metric");
        REGISTRY
            .register(Box::new(CACHE_MISSES.clone()))
            .expect("failed to register cache misses metric");
        REGISTRY
            .register(Box::new(UPSTREAM_REQUESTS.clone()))
            .expect("failed to register upstream requests metric");
        REGISTRY
            .register(Box::new(UPSTREAM_FAILURES.clone()))
            .expect("failed to register upstream failures metric");
        REGISTRY
            .register(Box::new(VIDEOS_RETURNED.clone()))
            .expect("failed to register videos returned metric");
    });
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to encode metrics".to_string(),
        );
    }
    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            tracing::error!(error = %e, "metrics output was not UTF-8");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode metrics".to_string(),
            )
        }
    }
}
