//! # Press API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use press_core::ports::{PasswordService, TokenService};
use press_infra::auth::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    telemetry::init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Press API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = match AppState::new(&config.database).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let token_service: web::Data<Arc<dyn TokenService>> =
        web::Data::new(Arc::new(JwtTokenService::from_env()));
    let password_service: web::Data<Arc<dyn PasswordService>> =
        web::Data::new(Arc::new(Argon2PasswordService::new()));

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .app_data(token_service.clone())
            .app_data(password_service.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
