//! Persistence interfaces consumed by the service layer.

use async_trait::async_trait;

use noticeboard_core::result::AppResult;
use noticeboard_core::types::{DayWindow, EmployeeId};
use noticeboard_entity::notification::{
    Audience, NewNotification, Notification, NotificationWithEmployee,
};

/// Selection criteria for [`NotificationStore::find_all`].
///
/// Every field left as `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    /// Restrict to one audience (a single employee, or global only).
    pub audience: Option<Audience>,
    /// Restrict to notifications effective inside this window.
    pub window: Option<DayWindow>,
}

impl NotificationFilter {
    /// Matches every notification.
    pub fn all() -> Self {
        Self::default()
    }

    /// Global notifications effective inside `window`.
    pub fn global_on(window: DayWindow) -> Self {
        Self {
            audience: Some(Audience::Global),
            window: Some(window),
        }
    }

    /// Notifications targeted at `employee_id` effective inside `window`.
    pub fn employee_on(employee_id: EmployeeId, window: DayWindow) -> Self {
        Self {
            audience: Some(Audience::Employee(employee_id)),
            window: Some(window),
        }
    }

    /// In-process evaluation of the filter, used by the memory store.
    pub fn matches(&self, notification: &Notification) -> bool {
        let audience_ok = match &self.audience {
            None => true,
            Some(Audience::Global) => notification.is_global,
            Some(Audience::Employee(id)) => {
                !notification.is_global && notification.employee_id.as_ref() == Some(id)
            }
        };
        let window_ok = self
            .window
            .as_ref()
            .is_none_or(|window| notification.falls_in(window));
        audience_ok && window_ok
    }
}

/// Storage for notifications.
///
/// Implementations are responsible for concurrent-write safety.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a notification and return it with its assigned id.
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// All notifications matching `filter`. Order is unspecified.
    async fn find_all(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>>;

    /// All notifications, each joined with its recipient's display fields.
    async fn find_all_with_employee(&self) -> AppResult<Vec<NotificationWithEmployee>>;
}

/// Read-only view over employees.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Whether an employee with this id exists.
    async fn exists(&self, employee_id: &EmployeeId) -> AppResult<bool>;
}
