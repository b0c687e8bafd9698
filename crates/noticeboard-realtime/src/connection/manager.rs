//! Connection manager: connection lifecycle and message routing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use noticeboard_core::config::RealtimeConfig;

use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            config,
        }
    }

    /// Registers a new connection and queues its `connected` greeting.
    ///
    /// Returns the connection handle and a receiver for outbound messages.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(tx));

        self.pool.add(handle.clone());
        handle.send(OutboundMessage::Connected {
            connection_id: handle.id,
        });

        info!(
            conn_id = %handle.id,
            total = self.pool.connection_count(),
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(
                conn_id = %conn_id,
                connected_secs = (Utc::now() - handle.connected_at).num_seconds(),
                total = self.pool.connection_count(),
                "WebSocket connection unregistered"
            );
        }
    }

    /// Processes an inbound text frame from a client.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Message from unknown connection");
            return;
        };

        match serde_json::from_str::<InboundMessage>(raw_message) {
            Ok(InboundMessage::Pong { .. }) => {
                handle.record_pong().await;
                debug!(conn_id = %conn_id, "Pong received");
            }
            Err(e) => {
                debug!(conn_id = %conn_id, error = %e, "Unrecognised inbound message");
                handle.send(OutboundMessage::error(
                    "INVALID_MESSAGE",
                    format!("Failed to parse message: {e}"),
                ));
            }
        }
    }

    /// Queues a message to every connected client.
    ///
    /// Returns how many connections accepted it. Connections whose buffer
    /// is full or closed miss the message.
    pub fn broadcast_all(&self, message: &OutboundMessage) -> usize {
        let all = self.pool.all_connections();
        let sent = all.iter().filter(|conn| conn.send(message.clone())).count();

        if sent < all.len() {
            warn!(
                kind = message.kind(),
                sent,
                total = all.len(),
                "Broadcast not accepted by every connection"
            );
        }
        sent
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_dead();
            self.pool.remove(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Whether at least one client is connected.
    pub fn has_connections(&self) -> bool {
        !self.pool.is_empty()
    }

}
