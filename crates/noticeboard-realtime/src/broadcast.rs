//! Pushes a day's global notifications to every connected client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use noticeboard_core::types::DayWindow;
use noticeboard_database::store::{NotificationFilter, NotificationStore};
use noticeboard_service::{GlobalPublisher, PublishOutcome};

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;

/// [`GlobalPublisher`] that re-reads the day's global notifications from the
/// store and fans them out over WebSocket.
#[derive(Debug, Clone)]
pub struct GlobalBroadcaster {
    connections: Arc<ConnectionManager>,
    store: Arc<dyn NotificationStore>,
}

impl GlobalBroadcaster {
    /// Creates a broadcaster over `connections`, reading from `store`.
    pub fn new(connections: Arc<ConnectionManager>, store: Arc<dyn NotificationStore>) -> Self {
        Self { connections, store }
    }
}

#[async_trait]
impl GlobalPublisher for GlobalBroadcaster {
    async fn publish_global_for_day(&self, timestamp: DateTime<Utc>) -> PublishOutcome {
        if !self.connections.has_connections() {
            return PublishOutcome::NoSubscribers;
        }

        let window = match DayWindow::containing(timestamp) {
            Ok(window) => window,
            Err(e) => {
                error!(%timestamp, error = %e, "Cannot compute day window for publish");
                return PublishOutcome::Aborted;
            }
        };

        let notifications = match self
            .store
            .find_all(&NotificationFilter::global_on(window))
            .await
        {
            Ok(notifications) => notifications,
            Err(e) => {
                error!(%window, error = %e, "Failed to load global notifications for publish");
                return PublishOutcome::Aborted;
            }
        };

        let date = window.date();
        let count = notifications.len();
        debug!(%date, count, "Broadcasting global notifications");

        let recipients = self
            .connections
            .broadcast_all(&OutboundMessage::GlobalNotifications {
                date,
                notifications,
            });

        info!(%date, count, recipients, "Global notifications broadcast");
        PublishOutcome::Delivered {
            date,
            recipients,
            notifications: count,
        }
    }
}
