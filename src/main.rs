use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tutor_match::config::Settings;
use tutor_match::core::Matcher;
use tutor_match::routes::{self, AppState};
use tutor_match::services::{sample_dataset, DataStore, MatchCache};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "full".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Tutor Match service...");

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        Error::new(ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    // Initialize data store
    let store = match &settings.storage.data_file {
        Some(path) => DataStore::open(path).await.map_err(|e| {
            error!("Failed to open data file {}: {}", path, e);
            Error::new(ErrorKind::Other, e)
        })?,
        None => {
            info!("No data file configured, keeping data in memory");
            DataStore::in_memory()
        }
    };

    if settings.storage.seed_examples {
        store.seed_if_empty(sample_dataset()).await.map_err(|e| {
            error!("Failed to seed sample data: {}", e);
            Error::new(ErrorKind::Other, e)
        })?;
    }

    let store = Arc::new(store);

    // Initialize result cache
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(16);
    let cache = Arc::new(MatchCache::new(l1_cache_size, cache_ttl));

    info!("Match cache initialized ({} entries, TTL: {}s)", l1_cache_size, cache_ttl);

    let matcher = Matcher::new(settings.matching.parallel_threshold());

    info!("Matcher initialized: {:?}", matcher);

    // Build application state
    let app_state = AppState {
        store,
        cache,
        matcher,
        matching: settings.matching.clone(),
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
