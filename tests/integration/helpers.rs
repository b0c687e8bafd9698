//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use noticeboard_api::{AppState, build_app};
use noticeboard_core::config::{AppConfig, StoreProvider};
use noticeboard_core::types::EmployeeId;
use noticeboard_database::{MemoryEmployeeDirectory, MemoryNotificationStore};
use noticeboard_entity::employee::Employee;

/// Test application context backed by the in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, also used by [`TestApp::spawn`]
    pub state: AppState,
    /// Notification store, for failure injection and query counting
    pub store: MemoryNotificationStore,
    /// Employee directory
    pub directory: MemoryEmployeeDirectory,
}

impl TestApp {
    /// Create a new test application with employees `E1` and `E2`.
    pub async fn new() -> Self {
        Self::with_heartbeat(3600, 10).await
    }

    /// Same as [`TestApp::new`] with the given heartbeat timings, in seconds.
    pub async fn with_heartbeat(ping_interval_seconds: u64, ping_timeout_seconds: u64) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.realtime.ping_interval_seconds = ping_interval_seconds;
        config.realtime.ping_timeout_seconds = ping_timeout_seconds;

        let directory = MemoryEmployeeDirectory::with_employees([
            employee("E1", "Ana", "Lopez", Some("Ruiz")),
            employee("E2", "Bruno", "Diaz", None),
        ]);
        let store = MemoryNotificationStore::new(directory.clone());

        let state = AppState::new(
            config,
            Arc::new(store.clone()),
            Arc::new(directory.clone()),
            None,
        );
        let router = build_app(state.clone());

        Self {
            router,
            state,
            store,
            directory,
        }
    }

    /// Serve the app on an ephemeral local port, sharing this app's state.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let app = build_app(self.state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        addr
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// POST a targeted notification and assert it was created.
    pub async fn create_targeted(&self, employee_id: &str, timestamp: &str, title: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/notifications",
                Some(serde_json::json!({
                    "employee_id": employee_id,
                    "timestamp": timestamp,
                    "title": title,
                    "description": "Details",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// POST a global notification and assert it was created.
    pub async fn create_global(&self, timestamp: &str, title: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/notifications/global",
                Some(serde_json::json!({
                    "timestamp": timestamp,
                    "title": title,
                    "description": "Details",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` array of a success envelope.
    pub fn data_array(&self) -> &Vec<Value> {
        self.body["data"].as_array().expect("data is not an array")
    }
}

fn employee(id: &str, name: &str, paternal: &str, maternal: Option<&str>) -> Employee {
    Employee {
        employee_id: EmployeeId::new(id),
        name: name.to_string(),
        last_name_paternal: paternal.to_string(),
        last_name_maternal: maternal.map(str::to_string),
    }
}
