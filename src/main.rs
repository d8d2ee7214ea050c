//! Fleetify Pricing Server
//!
//! Prices vehicle rentals for the contract wizard from each vehicle's rate
//! card, picking the cheapest mix of monthly, weekly and daily billing.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use fleetify_api::{configure_health, configure_pricing};
use fleetify_core::AppConfig;
use fleetify_services::{CachedPricingEngine, PricingEngine};
use std::env;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_health)
            .configure(configure_pricing),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fleetify_pricing={},fleetify_api={},fleetify_services={},actix_web=info",
            log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Fleetify Pricing Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            AppConfig::from_file(&path)
        }
        Err(_) => AppConfig::load(),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    info!(
        currency = %config.pricing.currency,
        scale = config.pricing.currency_scale,
        cache_enabled = config.cache.enabled,
        "Pricing engine configured"
    );

    let engine = web::Data::new(CachedPricingEngine::new(
        PricingEngine::new(config.pricing.clone()),
        &config.cache,
    ));

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin.to_str().map_or(false, |origin_str| {
                    cors_origins_inner
                        .split(',')
                        .any(|o| o.trim() == origin_str)
                })
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(engine.clone())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
