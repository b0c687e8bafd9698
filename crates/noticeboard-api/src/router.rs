//! Route definitions for the Noticeboard HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and the request logging middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Notification creation and queries
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/global",
            post(handlers::notification::create_global_notification),
        )
        .route(
            "/notifications/with-employee",
            get(handlers::notification::list_notifications_with_employee),
        )
        .route(
            "/notifications/employees/{employee_id}/days/{date}",
            get(handlers::notification::employee_notifications_for_day),
        )
        .route(
            "/notifications/global/days/{date}",
            get(handlers::notification::global_notifications_for_day),
        )
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
