//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use noticeboard_core::config::{AppConfig, StoreProvider};
use noticeboard_core::error::AppError;
use noticeboard_database::{
    DatabasePool, MemoryEmployeeDirectory, MemoryNotificationStore, PgEmployeeRepository,
    PgNotificationRepository,
};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the Noticeboard server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Noticeboard server...");

    // ── Step 1: Initialize stores ────────────────────────────────
    let state = match config.database.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            let store = Arc::new(PgNotificationRepository::new(db.pool().clone()));
            let directory = Arc::new(PgEmployeeRepository::new(db.pool().clone()));
            AppState::new(config.clone(), store, directory, Some(db))
        }
        StoreProvider::Memory => {
            info!("Using in-memory stores; data is lost on exit");
            let directory = MemoryEmployeeDirectory::new();
            let store = Arc::new(MemoryNotificationStore::new(directory.clone()));
            AppState::new(config.clone(), store, Arc::new(directory), None)
        }
    };

    // ── Step 2: Build and start HTTP server ──────────────────────
    let realtime = state.realtime.clone();
    let db_pool = state.db_pool.clone();
    let app = build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "Noticeboard server listening");

    let shutdown_realtime = realtime.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Open sockets would otherwise hold the graceful shutdown.
            shutdown_realtime.shutdown();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 3: Release resources ────────────────────────────────
    if let Some(db) = db_pool {
        db.close().await;
    }

    info!("Noticeboard server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
