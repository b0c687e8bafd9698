//! Inbound and outbound WebSocket message type definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use noticeboard_entity::notification::Notification;

use crate::connection::handle::ConnectionId;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Pong response to server ping.
    Pong {
        /// Echoed ping timestamp, if the client sent one back.
        #[serde(default)]
        timestamp: Option<DateTime<Utc>>,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// First message on every connection.
    Connected {
        /// Server-assigned connection id.
        connection_id: ConnectionId,
    },
    /// Every global notification effective on `date` (UTC), sent after a
    /// global notification for that day is created.
    GlobalNotifications {
        /// The UTC calendar day.
        date: NaiveDate,
        /// The day's global notifications.
        notifications: Vec<Notification>,
    },
    /// Server ping. Written to the socket as a WebSocket ping frame carrying
    /// the RFC 3339 timestamp; a control-frame pong or a JSON `pong` answers it.
    Ping {
        /// Server time.
        timestamp: DateTime<Utc>,
    },
    /// Error response.
    Error {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
    },
}

impl OutboundMessage {
    /// Build an error message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Wire tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::GlobalNotifications { .. } => "global_notifications",
            Self::Ping { .. } => "ping",
            Self::Error { .. } => "error",
        }
    }
}
