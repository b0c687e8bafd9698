//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use noticeboard_core::types::{DayWindow, EmployeeId, NotificationId};

use super::audience::Audience;
use crate::employee::EmployeeSummary;

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier, assigned by the store.
    pub id: NotificationId,
    /// Addressed to every employee. Implies `employee_id` is `None`.
    pub is_global: bool,
    /// When the notification takes effect (caller supplied).
    #[sqlx(rename = "effective_at")]
    pub timestamp: DateTime<Utc>,
    /// Short title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Recipient for targeted notifications.
    pub employee_id: Option<EmployeeId>,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materialize a stored row from an insert request.
    pub fn from_new(id: NotificationId, new: NewNotification, created_at: DateTime<Utc>) -> Self {
        let is_global = new.audience.is_global();
        let employee_id = new.audience.employee_id().cloned();
        Self {
            id,
            is_global,
            timestamp: new.timestamp,
            title: new.title,
            description: new.description,
            employee_id,
            created_at,
        }
    }

    /// Whether this notification is effective inside `window`.
    pub fn falls_in(&self, window: &DayWindow) -> bool {
        window.contains(self.timestamp)
    }
}

/// Insert shape for a notification. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Recipient.
    pub audience: Audience,
    /// When the notification takes effect.
    pub timestamp: DateTime<Utc>,
    /// Short title.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl NewNotification {
    /// Notification addressed to a single employee.
    pub fn targeted(
        employee_id: EmployeeId,
        timestamp: DateTime<Utc>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            audience: Audience::Employee(employee_id),
            timestamp,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Notification addressed to everyone.
    pub fn global(
        timestamp: DateTime<Utc>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            audience: Audience::Global,
            timestamp,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A notification joined with its recipient's display fields.
///
/// `employee` is `None` for global notifications and for targeted ones whose
/// employee id has no matching employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationWithEmployee {
    /// The notification itself, flattened into the JSON object.
    #[serde(flatten)]
    pub notification: Notification,
    /// Recipient display fields.
    pub employee: Option<EmployeeSummary>,
}
