use actix_web::web;

use crate::utils::error::{json_error_handler, path_error_handler};

pub mod health;
pub mod index;
pub mod metrics;
pub mod swagger;
pub mod users;

/// Rotas e extractors da API. Usado pelo `main` e pelos testes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/", web::get().to(index::index))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::resource("/users")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get_user))
                .route(web::put().to(users::update_user))
                .route(web::delete().to(users::delete_user)),
        );
}
