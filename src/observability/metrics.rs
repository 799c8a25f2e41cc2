//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, status, route
//! - `router_request_duration_seconds` (histogram): latency by route
//! - `router_no_match_total` (counter): requests no route matched, by method
//! - `router_routes` (gauge): routes in the active table

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!("router_requests_total", "Requests dispatched to a route");
    ::metrics::describe_histogram!(
        "router_request_duration_seconds",
        ::metrics::Unit::Seconds,
        "Time from dispatch to handler response"
    );
    ::metrics::describe_counter!("router_no_match_total", "Requests that matched no route");
    ::metrics::describe_gauge!("router_routes", "Routes in the active table");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_dispatch(method: &str, status: u16, route: &str, start: Instant) {
    ::metrics::counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    ::metrics::histogram!("router_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_no_match(method: &str, start: Instant) {
    ::metrics::counter!("router_no_match_total", "method" => method.to_string()).increment(1);
    ::metrics::histogram!("router_request_duration_seconds", "route" => "none")
        .record(start.elapsed().as_secs_f64());
}

pub fn set_route_count(count: usize) {
    ::metrics::gauge!("router_routes").set(count as f64);
}
