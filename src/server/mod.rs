//! HTTP server exposing document parsing.
//!
//! Provides two endpoints:
//! - `GET /health` - liveness probe
//! - `POST /parse-doc` - download a Google Doc and extract keyword values

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::initialization::init_client;
use handlers::{health_handler, not_found_handler, parse_doc_handler};
pub use types::{status_for, ApiError, AppState, ErrorResponse, HealthResponse, ParseRequest};

/// Builds the router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/parse-doc", post(parse_doc_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Creates the shared state, binds the listener and serves until Ctrl-C or
/// SIGTERM.
pub async fn start_server(config: Config) -> Result<(), anyhow::Error> {
    let client = init_client(&config)?;
    let address = config.bind_address();
    let state = AppState {
        client,
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| InitializationError::BindError {
            address: address.clone(),
            source,
        })?;

    log::info!("Server listening on http://{}/", address);
    log::info!("  - Health: GET http://{}/health", address);
    log::info!("  - Parse: POST http://{}/parse-doc", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received, draining connections");
}
