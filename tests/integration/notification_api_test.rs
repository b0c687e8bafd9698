//! Integration tests for the notification HTTP API.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_targeted_notification() {
    let app = helpers::TestApp::new().await;

    let created = app
        .create_targeted("E1", "2024-03-10T09:00:00Z", "Shift change")
        .await;

    assert_eq!(created["is_global"], false);
    assert_eq!(created["employee_id"], "E1");
    assert_eq!(created["title"], "Shift change");
    assert!(created["id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_targeted_for_unknown_employee_is_accepted() {
    let app = helpers::TestApp::new().await;

    let created = app
        .create_targeted("E404", "2024-03-10T09:00:00Z", "Orphan")
        .await;

    assert_eq!(created["employee_id"], "E404");
}

#[tokio::test]
async fn test_create_rejects_invalid_bodies() {
    let app = helpers::TestApp::new().await;

    let empty_title = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "employee_id": "E1",
                "timestamp": "2024-03-10T09:00:00Z",
                "title": "",
                "description": "x",
            })),
        )
        .await;
    assert_eq!(empty_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_title.body["error"], "VALIDATION_ERROR");

    let missing_timestamp = app
        .request(
            "POST",
            "/api/notifications/global",
            Some(json!({ "title": "t", "description": "d" })),
        )
        .await;
    assert_eq!(missing_timestamp.status, StatusCode::BAD_REQUEST);

    let bad_timestamp = app
        .request(
            "POST",
            "/api/notifications/global",
            Some(json!({ "timestamp": "tomorrow", "title": "t", "description": "d" })),
        )
        .await;
    assert_eq!(bad_timestamp.status, StatusCode::BAD_REQUEST);

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_global_notification() {
    let app = helpers::TestApp::new().await;

    let created = app.create_global("2024-03-10T09:00:00Z", "Holiday").await;

    assert_eq!(created["is_global"], true);
    assert!(created["employee_id"].is_null());
}

#[tokio::test]
async fn test_list_all() {
    let app = helpers::TestApp::new().await;
    app.create_targeted("E1", "2024-03-10T09:00:00Z", "a").await;
    app.create_targeted("E2", "2024-03-11T09:00:00Z", "b").await;
    app.create_global("2024-03-12T09:00:00Z", "c").await;

    let response = app.request("GET", "/api/notifications", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data_array().len(), 3);
}

#[tokio::test]
async fn test_list_with_employee_detail() {
    let app = helpers::TestApp::new().await;
    app.create_targeted("E1", "2024-03-10T09:00:00Z", "targeted").await;
    app.create_targeted("E404", "2024-03-10T09:00:00Z", "dangling").await;
    app.create_global("2024-03-10T09:00:00Z", "global").await;

    let response = app
        .request("GET", "/api/notifications/with-employee", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let rows = response.data_array();
    let by_title = |title: &str| {
        rows.iter()
            .find(|row| row["title"] == title)
            .unwrap_or_else(|| panic!("missing {title}"))
    };

    let targeted = by_title("targeted");
    assert_eq!(targeted["employee"]["name"], "Ana");
    assert_eq!(targeted["employee"]["last_name_paternal"], "Lopez");
    assert_eq!(targeted["employee"]["last_name_maternal"], "Ruiz");

    assert!(by_title("dangling")["employee"].is_null());
    assert!(by_title("global")["employee"].is_null());
}

#[tokio::test]
async fn test_employee_notifications_for_day() {
    let app = helpers::TestApp::new().await;
    app.create_targeted("E1", "2024-03-10T00:00:00Z", "midnight").await;
    app.create_targeted("E1", "2024-03-10T23:59:59Z", "late").await;
    app.create_targeted("E1", "2024-03-11T00:00:00Z", "next day").await;
    app.create_targeted("E2", "2024-03-10T12:00:00Z", "other employee").await;
    app.create_global("2024-03-10T12:00:00Z", "global").await;

    for date in ["2024-03-10", "2024-03-10T15:30:00Z"] {
        let response = app
            .request(
                "GET",
                &format!("/api/notifications/employees/E1/days/{date}"),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{date}");

        let mut titles: Vec<&str> = response
            .data_array()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["late", "midnight"], "{date}");
    }
}

#[tokio::test]
async fn test_employee_notifications_unknown_employee() {
    let app = helpers::TestApp::new().await;
    app.create_targeted("E404", "2024-03-10T09:00:00Z", "orphan").await;

    let response = app
        .request("GET", "/api/notifications/employees/E404/days/2024-03-10", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(app.store.query_count(), 0);
}

#[tokio::test]
async fn test_employee_notifications_none_that_day() {
    let app = helpers::TestApp::new().await;
    app.create_targeted("E1", "2024-03-11T09:00:00Z", "tomorrow").await;

    let response = app
        .request("GET", "/api/notifications/employees/E1/days/2024-03-10", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let employee = app
        .request("GET", "/api/notifications/employees/E1/days/not-a-date", None)
        .await;
    assert_eq!(employee.status, StatusCode::BAD_REQUEST);

    let global = app
        .request("GET", "/api/notifications/global/days/2024-13-40", None)
        .await;
    assert_eq!(global.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_global_notifications_for_day() {
    let app = helpers::TestApp::new().await;
    app.create_global("2024-03-10T08:00:00Z", "on day").await;
    app.create_global("2024-03-11T00:00:00Z", "next day").await;
    app.create_targeted("E1", "2024-03-10T08:00:00Z", "targeted").await;

    let response = app
        .request("GET", "/api/notifications/global/days/2024-03-10", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data_array();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "on day");
}

#[tokio::test]
async fn test_global_day_uses_utc_calendar_day() {
    let app = helpers::TestApp::new().await;
    // 22:00 at UTC-5 is 03:00 UTC the following day.
    app.create_global("2024-03-10T22:00:00-05:00", "evening").await;

    let on_tenth = app
        .request("GET", "/api/notifications/global/days/2024-03-10", None)
        .await;
    assert_eq!(on_tenth.status, StatusCode::NOT_FOUND);

    let on_eleventh = app
        .request("GET", "/api/notifications/global/days/2024-03-11", None)
        .await;
    assert_eq!(on_eleventh.status, StatusCode::OK);
    assert_eq!(on_eleventh.data_array().len(), 1);
}

#[tokio::test]
async fn test_global_notifications_none_that_day() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/api/notifications/global/days/2024-03-10", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = helpers::TestApp::new().await;
    app.store.set_unavailable(true);

    let list = app.request("GET", "/api/notifications", None).await;
    assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list.body["error"], "DATABASE_ERROR");
    assert_eq!(list.body["message"], "An internal error occurred");

    let create = app
        .request(
            "POST",
            "/api/notifications/global",
            Some(json!({
                "timestamp": "2024-03-10T09:00:00Z",
                "title": "t",
                "description": "d",
            })),
        )
        .await;
    assert_eq!(create.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].as_str().is_some());
}

#[tokio::test]
async fn test_detailed_health_check() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "memory");
    assert_eq!(response.body["data"]["ws_connections"], 0);
}
