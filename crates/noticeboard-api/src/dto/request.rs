//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use noticeboard_core::types::EmployeeId;
use noticeboard_service::{CreateGlobal, CreateTargeted};

/// Body of `POST /api/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Recipient employee id.
    #[validate(length(min = 1, max = 64, message = "Employee id is required"))]
    pub employee_id: String,
    /// When the notification takes effect (RFC 3339, any offset).
    pub timestamp: DateTime<Utc>,
    /// Title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl From<CreateNotificationRequest> for CreateTargeted {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            employee_id: EmployeeId::new(req.employee_id),
            timestamp: req.timestamp,
            title: req.title,
            description: req.description,
        }
    }
}

/// Body of `POST /api/notifications/global`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGlobalNotificationRequest {
    /// When the notification takes effect (RFC 3339, any offset).
    pub timestamp: DateTime<Utc>,
    /// Title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl From<CreateGlobalNotificationRequest> for CreateGlobal {
    fn from(req: CreateGlobalNotificationRequest) -> Self {
        Self {
            timestamp: req.timestamp,
            title: req.title,
            description: req.description,
        }
    }
}
