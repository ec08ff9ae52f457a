//! Prometheus scrape endpoint.
//!
//! Exposes the order counters recorded by the use-cases
//! (`orders_created_total`, `order_mutations_total`, `orders_deleted_total`
//! and `order_failures_total`).

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], handle.render())
}
