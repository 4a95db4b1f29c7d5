//! Server mode
//!
//! Configures the HTTP routes and runs the server until a shutdown signal.

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::constants::API_PREFIX;
use crate::api::middleware::{AdminAuth, TimingMiddleware};
use crate::api::services::admin::routes::api_v1_routes;
use crate::api::services::{health_routes, redirect_routes};
use crate::config::AppConfig;
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::AppState;

/// Seconds workers get to finish in-flight requests after a stop signal
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Register shared data and every route.
///
/// Order matters: `/api` and `/health` must be registered before the
/// catch-all redirect resource.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.store.clone()))
        .app_data(web::Data::new(state.link_service.clone()))
        .app_data(web::Data::new(state.auth_service.clone()))
        .app_data(web::Data::new(state.sessions.clone()))
        .app_data(web::Data::new(state.clicks.clone()))
        .app_data(web::PayloadConfig::new(64 * 1024))
        .service(
            web::scope(API_PREFIX)
                .wrap(AdminAuth::new(state.sessions.clone()))
                .configure(api_v1_routes),
        )
        .service(health_routes())
        .service(redirect_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    let state = startup.state;
    let db = startup.db;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .configure(|cfg| configure_app(cfg, &state))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Server listening on http://{}", bind_address);
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated unexpectedly")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            info!("HTTP server stopped");
        }
    }

    if let Err(e) = db.close().await {
        warn!("Failed to close database cleanly: {}", e);
    }
    info!("Shutdown complete");
    Ok(())
}
