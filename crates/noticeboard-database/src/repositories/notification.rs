//! PostgreSQL notification repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use noticeboard_core::error::{AppError, ErrorKind};
use noticeboard_core::result::AppResult;
use noticeboard_core::types::{EmployeeId, NotificationId};
use noticeboard_entity::employee::EmployeeSummary;
use noticeboard_entity::notification::{
    Audience, NewNotification, Notification, NotificationWithEmployee,
};

use crate::store::{NotificationFilter, NotificationStore};

/// Notification store backed by the `notifications` table.
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the notification/employee left join.
#[derive(Debug, FromRow)]
struct JoinedRow {
    id: NotificationId,
    is_global: bool,
    effective_at: DateTime<Utc>,
    title: String,
    description: String,
    employee_id: Option<EmployeeId>,
    created_at: DateTime<Utc>,
    employee_name: Option<String>,
    employee_last_name_paternal: Option<String>,
    employee_last_name_maternal: Option<String>,
}

impl From<JoinedRow> for NotificationWithEmployee {
    fn from(row: JoinedRow) -> Self {
        let employee = match (row.employee_name, row.employee_last_name_paternal) {
            (Some(name), Some(last_name_paternal)) => Some(EmployeeSummary {
                name,
                last_name_paternal,
                last_name_maternal: row.employee_last_name_maternal,
            }),
            _ => None,
        };
        Self {
            notification: Notification {
                id: row.id,
                is_global: row.is_global,
                timestamp: row.effective_at,
                title: row.title,
                description: row.description,
                employee_id: row.employee_id,
                created_at: row.created_at,
            },
            employee,
        }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationRepository {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let id = NotificationId::new();
        let created = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, is_global, effective_at, title, description, employee_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(id)
        .bind(notification.audience.is_global())
        .bind(notification.timestamp)
        .bind(&notification.title)
        .bind(&notification.description)
        .bind(notification.audience.employee_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })?;

        debug!(id = %created.id, is_global = created.is_global, "Notification inserted");
        Ok(created)
    }

    async fn find_all(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM notifications WHERE TRUE");

        match &filter.audience {
            Some(Audience::Global) => {
                query.push(" AND is_global");
            }
            Some(Audience::Employee(employee_id)) => {
                query
                    .push(" AND NOT is_global AND employee_id = ")
                    .push_bind(employee_id.clone());
            }
            None => {}
        }

        if let Some(window) = &filter.window {
            query
                .push(" AND effective_at >= ")
                .push_bind(window.start)
                .push(" AND effective_at < ")
                .push_bind(window.end);
        }

        query.push(" ORDER BY effective_at, created_at");

        query
            .build_query_as::<Notification>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
            })
    }

    async fn find_all_with_employee(&self) -> AppResult<Vec<NotificationWithEmployee>> {
        let rows = sqlx::query_as::<_, JoinedRow>(
            "SELECT n.id, n.is_global, n.effective_at, n.title, n.description, n.employee_id, n.created_at, \
                    e.name AS employee_name, \
                    e.last_name_paternal AS employee_last_name_paternal, \
                    e.last_name_maternal AS employee_last_name_maternal \
             FROM notifications n \
             LEFT JOIN employees e ON e.employee_id = n.employee_id \
             ORDER BY n.effective_at, n.created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list notifications with employees",
                e,
            )
        })?;

        Ok(rows.into_iter().map(NotificationWithEmployee::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined_row(employee_name: Option<&str>) -> JoinedRow {
        JoinedRow {
            id: NotificationId::new(),
            is_global: false,
            effective_at: Utc::now(),
            title: "Shift change".to_string(),
            description: "Report at 7".to_string(),
            employee_id: Some(EmployeeId::new("E1")),
            created_at: Utc::now(),
            employee_name: employee_name.map(str::to_string),
            employee_last_name_paternal: employee_name.map(|_| "Lopez".to_string()),
            employee_last_name_maternal: None,
        }
    }

    #[test]
    fn test_joined_row_with_employee() {
        let joined = NotificationWithEmployee::from(joined_row(Some("Ana")));
        let employee = joined.employee.expect("employee detail");
        assert_eq!(employee.name, "Ana");
        assert_eq!(employee.last_name_paternal, "Lopez");
        assert_eq!(joined.notification.title, "Shift change");
    }

    #[test]
    fn test_joined_row_without_employee() {
        let joined = NotificationWithEmployee::from(joined_row(None));
        assert!(joined.employee.is_none());
        assert_eq!(joined.notification.employee_id, Some(EmployeeId::new("E1")));
    }
}
