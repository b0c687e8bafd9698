//! Top-level real-time engine.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use noticeboard_core::config::RealtimeConfig;
use noticeboard_database::store::NotificationStore;

use crate::broadcast::GlobalBroadcaster;
use crate::connection::heartbeat::HeartbeatConfig;
use crate::connection::manager::ConnectionManager;

/// Real-time engine shared by the WebSocket handler and the service layer.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Global notification broadcaster.
    pub broadcaster: Arc<GlobalBroadcaster>,
    /// Heartbeat settings for new connections.
    pub heartbeat: HeartbeatConfig,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl RealtimeEngine {
    /// Creates the engine. The broadcaster reads from `store`.
    pub fn new(config: RealtimeConfig, store: Arc<dyn NotificationStore>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let heartbeat = HeartbeatConfig::from(&config);
        let connections = Arc::new(ConnectionManager::new(config));
        let broadcaster = Arc::new(GlobalBroadcaster::new(connections.clone(), store));

        info!(
            ping_interval = ?heartbeat.ping_interval,
            ping_timeout = ?heartbeat.ping_timeout,
            "Real-time engine initialized"
        );

        Self {
            connections,
            broadcaster,
            heartbeat,
            shutdown_tx,
        }
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals connection tasks to stop and drops every connection.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
    }
}
