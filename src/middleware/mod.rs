use actix_cors::Cors;

pub mod request_metrics;

pub use request_metrics::RequestMetrics;

/// CORS liberado para qualquer origem, método e header
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
