//! Individual WebSocket connection handle.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, mpsc};
use tracing::warn;
use uuid::Uuid;

use crate::message::types::OutboundMessage;

/// Unique connection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A handle to a single WebSocket connection.
///
/// Holds the sender side of the connection's bounded outbound buffer.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Sender for outbound messages
    sender: mpsc::Sender<OutboundMessage>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Last pong received (starts at `connected_at`)
    last_pong: RwLock<DateTime<Utc>>,
    /// Whether the connection is still alive
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(sender: mpsc::Sender<OutboundMessage>) -> Self {
        let now = Utc::now();
        Self {
            id: ConnectionId::new(),
            sender,
            connected_at: now,
            last_pong: RwLock::new(now),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue an outbound message without waiting.
    ///
    /// Returns `false` when the message was dropped: the connection is dead,
    /// its buffer is full, or the receiver is gone (which also marks the
    /// connection dead).
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(msg)) => {
                warn!(
                    conn_id = %self.id,
                    kind = msg.kind(),
                    "Connection send buffer full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as dead
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Record a pong response
    pub async fn record_pong(&self) {
        *self.last_pong.write().await = Utc::now();
    }

    /// When the last pong arrived.
    pub async fn last_pong(&self) -> DateTime<Utc> {
        *self.last_pong.read().await
    }
}
