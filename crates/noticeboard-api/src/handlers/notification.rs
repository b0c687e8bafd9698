//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use noticeboard_core::types::EmployeeId;
use noticeboard_entity::notification::{Notification, NotificationWithEmployee};

use crate::dto::request::{CreateGlobalNotificationRequest, CreateNotificationRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let created = state
        .notification_service
        .create_targeted(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// POST /api/notifications/global
pub async fn create_global_notification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateGlobalNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let created = state.notification_service.create_global(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.notification_service.list_all().await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/with-employee
pub async fn list_notifications_with_employee(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NotificationWithEmployee>>>, ApiError> {
    let notifications = state
        .notification_service
        .list_all_with_employee_detail()
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/employees/{employee_id}/days/{date}
pub async fn employee_notifications_for_day(
    State(state): State<AppState>,
    Path((employee_id, date)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state
        .notification_service
        .list_for_employee_on_day(&EmployeeId::new(employee_id), &date)
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/global/days/{date}
pub async fn global_notifications_for_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state
        .notification_service
        .list_global_on_day(&date)
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}
