mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use config::Settings;
use core::LeaderboardBuilder;
use routes::leaderboard::AppState;
use services::{spawn_refresh_worker, FeedCache, TimingClient};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Raceboard service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!(
        "Configuration loaded: {} categories, courses in {}",
        settings.categories.len(),
        settings.courses.dir
    );

    // Initialize the timing client and feed cache
    let fetch_timeout = settings.timing.fetch_timeout_secs.unwrap_or(30);
    let cache_ttl = settings.timing.cache_ttl_secs.unwrap_or(5);
    let max_categories = settings.timing.max_cached_categories.unwrap_or(64);
    let queue_depth = settings.timing.refresh_queue_depth.unwrap_or(32);

    let timing = Arc::new(TimingClient::new(fetch_timeout));
    let cache = Arc::new(FeedCache::new(timing, cache_ttl, max_categories));

    info!(
        "Feed cache initialized (TTL: {}s, timeout: {}s)",
        cache_ttl, fetch_timeout
    );

    // Background worker for fire-and-forget cache refreshes
    let refresh = spawn_refresh_worker(cache.clone(), queue_depth);

    // Build application state
    let app_state = AppState {
        settings: Arc::new(settings.clone()),
        cache,
        builder: LeaderboardBuilder::new(),
        refresh,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
