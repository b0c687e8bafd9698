//! Interface to whatever pushes global notifications to live subscribers.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Result of one publish attempt. Never surfaced to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// The day's global list was queued to `recipients` subscribers.
    Delivered {
        date: NaiveDate,
        recipients: usize,
        notifications: usize,
    },
    /// Nobody was connected; the store was not queried.
    NoSubscribers,
    /// Recomputing the day's list failed; nothing was sent.
    Aborted,
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered {
                date,
                recipients,
                notifications,
            } => write!(
                f,
                "delivered {notifications} notification(s) for {date} to {recipients} subscriber(s)"
            ),
            Self::NoSubscribers => write!(f, "no subscribers"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Pushes the global notifications of a day to every connected subscriber.
#[async_trait]
pub trait GlobalPublisher: Send + Sync + fmt::Debug + 'static {
    /// Recompute the global list for the UTC day containing `timestamp` and
    /// send it to all subscribers.
    async fn publish_global_for_day(&self, timestamp: DateTime<Utc>) -> PublishOutcome;
}
