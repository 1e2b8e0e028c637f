use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod attendance;
mod config;
mod db;
mod docs;
mod model;
mod routes;
mod store;

use attendance::AttendanceEngine;
use attendance::clock::ZonedClock;
use config::Config;
use db::init_db;
use store::{AttendanceStore, MemoryStore, MySqlAttendanceStore};

use crate::docs::ApiDoc;
use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance service"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendance.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store: Arc<dyn AttendanceStore> = match &config.database_url {
        Some(url) => {
            let pool = init_db(url)
                .await
                .context("Failed to connect to database")?;
            Arc::new(MySqlAttendanceStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, attendance is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let clock = ZonedClock::new(config.utc_offset);
    info!(offset = %clock.offset(), "Attendance dates resolved in fixed zone");

    let engine = Data::new(AttendanceEngine::new(
        store,
        Arc::new(clock),
        config.thresholds,
    ));

    let rate_limit = routes::rate_limit(config.rate_attendance_per_min)?;
    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(engine.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, &rate_limit))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
