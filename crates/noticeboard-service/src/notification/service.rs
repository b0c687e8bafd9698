//! Notification creation and retrieval.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use noticeboard_core::error::AppError;
use noticeboard_core::result::AppResult;
use noticeboard_core::types::{DayWindow, EmployeeId};
use noticeboard_database::store::{EmployeeDirectory, NotificationFilter, NotificationStore};
use noticeboard_entity::notification::{NewNotification, Notification, NotificationWithEmployee};

use super::publisher::{GlobalPublisher, PublishOutcome};

/// Input for a notification addressed to one employee.
#[derive(Debug, Clone)]
pub struct CreateTargeted {
    /// Recipient. Not checked against the employee directory.
    pub employee_id: EmployeeId,
    /// When the notification takes effect.
    pub timestamp: DateTime<Utc>,
    /// Short title.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// Input for a notification addressed to everyone.
#[derive(Debug, Clone)]
pub struct CreateGlobal {
    /// When the notification takes effect.
    pub timestamp: DateTime<Utc>,
    /// Short title.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// Creates notifications and answers list and day-window queries.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification persistence.
    store: Arc<dyn NotificationStore>,
    /// Employee existence lookups.
    directory: Arc<dyn EmployeeDirectory>,
    /// Receives every committed global notification.
    publisher: Arc<dyn GlobalPublisher>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn EmployeeDirectory>,
        publisher: Arc<dyn GlobalPublisher>,
    ) -> Self {
        Self {
            store,
            directory,
            publisher,
        }
    }

    /// Persist a notification for a single employee.
    pub async fn create_targeted(&self, input: CreateTargeted) -> AppResult<Notification> {
        validate_employee_id(&input.employee_id)?;
        validate_text(&input.title, &input.description)?;

        let created = self
            .store
            .create(NewNotification::targeted(
                input.employee_id,
                input.timestamp,
                input.title,
                input.description,
            ))
            .await?;

        info!(
            id = %created.id,
            employee_id = ?created.employee_id,
            timestamp = %created.timestamp,
            "Targeted notification created"
        );
        Ok(created)
    }

    /// Persist a global notification, then push that day's global list to
    /// live subscribers on a background task.
    ///
    /// The publish outcome is logged only. A failed or skipped publish never
    /// affects the returned notification.
    pub async fn create_global(&self, input: CreateGlobal) -> AppResult<Notification> {
        validate_text(&input.title, &input.description)?;

        let created = self
            .store
            .create(NewNotification::global(
                input.timestamp,
                input.title,
                input.description,
            ))
            .await?;

        info!(
            id = %created.id,
            timestamp = %created.timestamp,
            "Global notification created"
        );

        let publisher = Arc::clone(&self.publisher);
        let notification_id = created.id;
        let timestamp = created.timestamp;
        tokio::spawn(async move {
            match publisher.publish_global_for_day(timestamp).await {
                outcome @ PublishOutcome::Delivered { .. } => {
                    info!(%notification_id, %outcome, "Global notifications published");
                }
                PublishOutcome::NoSubscribers => {
                    debug!(%notification_id, "No subscribers connected, publish skipped");
                }
                PublishOutcome::Aborted => {
                    warn!(%notification_id, "Global notification publish aborted");
                }
            }
        });

        Ok(created)
    }

    /// Every notification in store order.
    pub async fn list_all(&self) -> AppResult<Vec<Notification>> {
        self.store.find_all(&NotificationFilter::all()).await
    }

    /// Every notification joined with its recipient's display fields.
    pub async fn list_all_with_employee_detail(&self) -> AppResult<Vec<NotificationWithEmployee>> {
        self.store.find_all_with_employee().await
    }

    /// Targeted notifications for `employee_id` effective on the UTC day
    /// named by `date`.
    ///
    /// Fails with `NotFound` when the employee is unknown, before the date
    /// is looked at and without consulting the notification store. Also
    /// `NotFound` when nothing falls in the window.
    pub async fn list_for_employee_on_day(
        &self,
        employee_id: &EmployeeId,
        date: &str,
    ) -> AppResult<Vec<Notification>> {
        if employee_id.is_blank() || !self.directory.exists(employee_id).await? {
            return Err(AppError::not_found(format!(
                "Employee '{employee_id}' not found"
            )));
        }

        let window = DayWindow::parse(date)?;

        let notifications = self
            .store
            .find_all(&NotificationFilter::employee_on(employee_id.clone(), window))
            .await?;

        if notifications.is_empty() {
            return Err(AppError::not_found(format!(
                "No notifications found for employee '{employee_id}' on {}",
                window.date()
            )));
        }

        debug!(%employee_id, %window, count = notifications.len(), "Employee day query");
        Ok(notifications)
    }

    /// Global notifications effective on the UTC day named by `date`.
    ///
    /// Fails with `NotFound` when nothing falls in the window.
    pub async fn list_global_on_day(&self, date: &str) -> AppResult<Vec<Notification>> {
        let window = DayWindow::parse(date)?;

        let notifications = self
            .store
            .find_all(&NotificationFilter::global_on(window))
            .await?;

        if notifications.is_empty() {
            return Err(AppError::not_found(format!(
                "No global notifications found on {}",
                window.date()
            )));
        }

        debug!(%window, count = notifications.len(), "Global day query");
        Ok(notifications)
    }
}

fn validate_employee_id(employee_id: &EmployeeId) -> AppResult<()> {
    if employee_id.is_blank() {
        return Err(AppError::validation("Employee id must not be empty"));
    }
    Ok(())
}

fn validate_text(title: &str, description: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title must not be empty"));
    }
    if description.trim().is_empty() {
        return Err(AppError::validation("Description must not be empty"));
    }
    Ok(())
}
