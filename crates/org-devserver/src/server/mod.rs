//! Server setup and initialization
//!
//! Provides the application builder and the server runners.

use std::net::SocketAddr;

use axum::Router;
use org_common::{AppConfig, AppError};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::seed::{seed_directory, seed_sessions};
use crate::state::{AppState, Directory};

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// State preloaded with the demo organizations, users, and tokens
pub fn create_app_state(config: AppConfig) -> AppState {
    let directory = Directory::new();
    seed_directory(&directory);

    let state = AppState::new(directory, config);
    seed_sessions(&state);
    info!(
        organizations = state.directory().list().len(),
        "Directory seeded"
    );
    state
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), AppError> {
    axum::serve(listener, create_app(state))
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.server.address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address {address}: {e}")))?;

    let state = create_app_state(config);
    run_server(create_app(state), addr).await
}
