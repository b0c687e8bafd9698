//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use noticeboard_core::config::AppConfig;
use noticeboard_database::DatabasePool;
use noticeboard_database::store::{EmployeeDirectory, NotificationStore};
use noticeboard_realtime::RealtimeEngine;
use noticeboard_service::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool; `None` when running on the memory provider
    pub db_pool: Option<DatabasePool>,
    /// WebSocket realtime engine
    pub realtime: RealtimeEngine,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wire the realtime engine and notification service over the given
    /// stores.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn EmployeeDirectory>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        let realtime = RealtimeEngine::new(config.realtime.clone(), Arc::clone(&store));
        let notification_service = Arc::new(NotificationService::new(
            store,
            directory,
            realtime.broadcaster.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            realtime,
            notification_service,
        }
    }
}
