use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Contadores HTTP compartilhados entre o middleware e o endpoint /metrics
#[derive(Clone, Default)]
pub struct Metrics {
    requests: Arc<AtomicU64>,
    errors: Arc<AtomicU64>,
}

impl Metrics {
    pub fn increment_request_count(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error_count(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsResponse {
        MetricsResponse {
            http_requests_total: self.requests.load(Ordering::Relaxed),
            http_errors_total: self.errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics(metrics: web::Data<Metrics>) -> HttpResponse {
    let snapshot = metrics.snapshot();

    let body = format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP errors\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n",
        snapshot.http_requests_total, snapshot.http_errors_total
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body)
}
