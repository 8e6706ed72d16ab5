mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::metrics::Metrics;
use crate::config::Settings;
use crate::database::Database;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting User Management API...");
    log::info!("📊 Database: {}", settings.database_url);

    let db = Database::connect(&settings.database_url, settings.max_connections)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to open database: {}", e);
            io::Error::other(e)
        })?;

    // `user-management-api migrate`: só aplica o schema e sai
    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    if migrate_only || settings.auto_migrate {
        db.run_migrations().await.map_err(|e| {
            log::error!("❌ Migration failed: {}", e);
            io::Error::other(e)
        })?;
    }

    if migrate_only {
        return Ok(());
    }

    let db_data = web::Data::new(db);
    let metrics = Metrics::default();
    let metrics_data = web::Data::new(metrics.clone());

    log::info!("🌐 Server starting on {}", settings.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", settings.bind_address());

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(metrics_data.clone())
            .wrap(middleware::cors())
            .wrap(middleware::RequestMetrics::new(metrics.clone()))
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(settings.bind_address())?
    .run()
    .await
}
