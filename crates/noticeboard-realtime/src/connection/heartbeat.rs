//! Ping/pong heartbeat for WebSocket keepalive.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time;
use tracing::{debug, warn};

use noticeboard_core::config::RealtimeConfig;

use super::handle::ConnectionHandle;
use crate::message::types::OutboundMessage;

/// Heartbeat configuration
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Interval between pings
    pub ping_interval: Duration,
    /// Grace period after a missed ping before the connection is dead
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    /// Longest silence tolerated: one full interval plus the timeout.
    pub fn max_silence(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }

    /// Whether a connection whose last pong was at `last_pong` is dead at `now`.
    pub fn is_expired(&self, last_pong: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        (now - last_pong)
            .to_std()
            .is_ok_and(|elapsed| elapsed > self.max_silence())
    }
}

impl From<&RealtimeConfig> for HeartbeatConfig {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds.max(1)),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds),
        }
    }
}

/// Run heartbeat loop for a connection.
///
/// Queues a ping every interval (the socket writer turns it into a ping
/// control frame) and returns once the connection is dead, either because
/// it was closed elsewhere or because no pong arrived in time.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, config: HeartbeatConfig) {
    let mut interval = time::interval(config.ping_interval);
    // The first tick fires immediately.
    interval.tick().await;

    loop {
        interval.tick().await;

        if !handle.is_alive() {
            break;
        }

        let last_pong = handle.last_pong().await;
        if config.is_expired(last_pong, Utc::now()) {
            warn!(
                conn_id = %handle.id,
                last_pong = %last_pong,
                "Heartbeat timeout, closing connection"
            );
            handle.mark_dead();
            break;
        }

        let ping = OutboundMessage::Ping {
            timestamp: Utc::now(),
        };
        if !handle.send(ping) && !handle.is_alive() {
            debug!(conn_id = %handle.id, "Ping send failed, connection closed");
            break;
        }
    }

    debug!(conn_id = %handle.id, "Heartbeat loop ended");
}
