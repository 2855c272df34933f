mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use crate::config::Settings;
use crate::core::{RelevancyEvaluator, RetryPolicy};
use crate::routes::evaluate::AppState;
use crate::services::OpenAiClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Lead Match relevancy service...");

    // Load configuration; a missing completion API credential is fatal here,
    // before the server binds
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the completion client
    let backend = Arc::new(OpenAiClient::new(&settings.openai));

    info!(
        "Completion client initialized (model: {}, timeout: {}s)",
        settings.openai.model, settings.openai.request_timeout_secs
    );

    // Initialize the evaluator with the configured retry and pacing policy
    let retry = RetryPolicy::from_settings(&settings.retry);
    let lead_delay = Duration::from_secs(settings.evaluation.lead_delay_secs);

    let evaluator = Arc::new(RelevancyEvaluator::new(backend, retry, lead_delay));

    info!(
        "Evaluator initialized (max attempts: {}, inter-lead delay: {}s)",
        settings.retry.max_attempts, settings.evaluation.lead_delay_secs
    );

    // Build application state
    let app_state = AppState { evaluator };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origins = settings.cors.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
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
