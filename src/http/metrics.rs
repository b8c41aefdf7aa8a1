use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Instant;

/// Powers of 5 across 11 exponents, preceded by a zero bucket — the exact
/// scheme the original Python `prometheus_client` plugin shipped for its
/// body-size histograms (see SPEC_FULL.md §9). `+Inf` is appended
/// automatically by the `prometheus` crate, not listed here.
fn body_size_buckets() -> Vec<f64> {
    let mut buckets = vec![0.0];
    buckets.extend((0..11).map(|i| 5f64.powi(i)));
    buckets
}

/// HTTP request/response counters and latency/size histograms, wrapping
/// every route transparently (C7 "wraps C5 transparently"). One instance is
/// built at startup and shared (via `Arc`) with the axum middleware and the
/// `/metrics` scrape handler.
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    responses_total: IntCounterVec,
    latency_seconds: Histogram,
    request_body_bytes: Histogram,
    response_body_bytes: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests."),
            &["method", "scheme"],
        )
        .expect("valid metric");
        let responses_total = IntCounterVec::new(
            Opts::new("http_responses_total", "Total number of HTTP responses."),
            &["status"],
        )
        .expect("valid metric");
        let latency_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_latency_seconds",
            "Overall HTTP transaction latency.",
        ))
        .expect("valid metric");
        let request_body_bytes = Histogram::with_opts(
            HistogramOpts::new("http_requests_body_bytes", "Breakdown of HTTP requests by content length.")
                .buckets(body_size_buckets()),
        )
        .expect("valid metric");
        let response_body_bytes = Histogram::with_opts(
            HistogramOpts::new("http_responses_body_bytes", "Breakdown of HTTP responses by content length.")
                .buckets(body_size_buckets()),
        )
        .expect("valid metric");

        registry.register(Box::new(requests_total.clone())).expect("register metric");
        registry.register(Box::new(responses_total.clone())).expect("register metric");
        registry.register(Box::new(latency_seconds.clone())).expect("register metric");
        registry.register(Box::new(request_body_bytes.clone())).expect("register metric");
        registry.register(Box::new(response_body_bytes.clone())).expect("register metric");

        Metrics {
            registry,
            requests_total,
            responses_total,
            latency_seconds,
            request_body_bytes,
            response_body_bytes,
        }
    }

    /// Renders the current state of every series in Prometheus text
    /// exposition format.
    pub fn render(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buf).expect("encode metrics");
        String::from_utf8(buf).expect("metrics are valid utf8")
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware wrapping every route: records the request counter and body
/// size up front, times the handler, then records the response counter,
/// body size and latency. Mirrors the original's single `MetricsPlugin`
/// wrapping every BottlePy route.
pub async fn track_metrics(State(metrics): State<Arc<Metrics>>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let scheme = request.uri().scheme_str().unwrap_or("http").to_string();
    metrics.requests_total.with_label_values(&[&method, &scheme]).inc();

    let (parts, body) = request.into_parts();
    let body_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    metrics.request_body_bytes.observe(body_bytes.len() as f64);
    let request = Request::from_parts(parts, Body::from(body_bytes));

    let start = Instant::now();
    let response = next.run(request).await;
    metrics.latency_seconds.observe(start.elapsed().as_secs_f64());

    let status = response.status().as_u16().to_string();
    metrics.responses_total.with_label_values(&[&status]).inc();

    let (parts, body) = response.into_parts();
    let body_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    metrics.response_body_bytes.observe(body_bytes.len() as f64);
    Response::from_parts(parts, Body::from(body_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_size_buckets_match_original_scheme() {
        let buckets = body_size_buckets();
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0], 0.0);
        assert_eq!(buckets[1], 1.0);
        assert_eq!(buckets[11], 5f64.powi(10));
    }

    #[test]
    fn render_includes_registered_series() {
        let metrics = Metrics::new();
        metrics.requests_total.with_label_values(&["GET", "http"]).inc();
        let text = metrics.render();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("http_latency_seconds"));
        assert!(text.contains("http_requests_body_bytes"));
    }
}
