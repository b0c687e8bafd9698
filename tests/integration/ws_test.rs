//! Integration tests for WebSocket connection and global broadcast.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use http::StatusCode;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: SocketAddr) -> (Client, Value) {
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("WebSocket handshake failed");
    let greeting = next_message(&mut ws).await.expect("no greeting");
    (ws, greeting)
}

/// Next JSON message from the server, skipping control frames. `None` on
/// timeout.
async fn next_message(ws: &mut Client) -> Option<Value> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let frame = tokio::time::timeout_at(deadline, ws.next()).await.ok()??;
        if let Message::Text(text) = frame.expect("WebSocket error") {
            return Some(serde_json::from_str(text.as_str()).expect("invalid JSON"));
        }
    }
}

async fn wait_for_connections(app: &helpers::TestApp, expected: usize) {
    for _ in 0..100 {
        if app.state.realtime.connections.connection_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} connections, found {}",
        app.state.realtime.connections.connection_count()
    );
}

#[tokio::test]
async fn test_ws_requires_upgrade() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/ws", None).await;

    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::UPGRADE_REQUIRED
            || response.status == StatusCode::METHOD_NOT_ALLOWED,
        "Expected upgrade rejection, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_connect_sends_greeting() {
    let app = helpers::TestApp::new().await;
    let addr = app.spawn().await;

    let (_ws, greeting) = connect(addr).await;

    assert_eq!(greeting["type"], "connected");
    assert!(greeting["connection_id"].as_str().is_some());

    wait_for_connections(&app, 1).await;
    let health = app.request("GET", "/api/health/detailed", None).await;
    assert_eq!(health.body["data"]["ws_connections"], 1);
}

#[tokio::test]
async fn test_global_creation_broadcasts_whole_day() {
    let app = helpers::TestApp::new().await;
    app.create_global("2024-03-10T06:00:00Z", "earlier").await;
    app.create_global("2024-03-11T06:00:00Z", "other day").await;

    let addr = app.spawn().await;
    let (mut first, _) = connect(addr).await;
    let (mut second, _) = connect(addr).await;

    app.create_global("2024-03-10T18:00:00Z", "later").await;

    for ws in [&mut first, &mut second] {
        let event = next_message(ws).await.expect("no broadcast");
        assert_eq!(event["type"], "global_notifications");
        assert_eq!(event["date"], "2024-03-10");

        let mut titles: Vec<&str> = event["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["earlier", "later"]);
    }

    // Exactly one event per creation.
    assert!(next_message(&mut first).await.is_none());
}

#[tokio::test]
async fn test_targeted_creation_does_not_broadcast() {
    let app = helpers::TestApp::new().await;
    let addr = app.spawn().await;
    let (mut ws, _) = connect(addr).await;

    app.create_targeted("E1", "2024-03-10T09:00:00Z", "private")
        .await;

    assert!(next_message(&mut ws).await.is_none());
}

#[tokio::test]
async fn test_invalid_client_message_gets_error() {
    let app = helpers::TestApp::new().await;
    let addr = app.spawn().await;
    let (mut ws, _) = connect(addr).await;

    ws.send(Message::Text(r#"{"type":"subscribe"}"#.into()))
        .await
        .unwrap();
    let reply = next_message(&mut ws).await.expect("no error reply");
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["code"], "INVALID_MESSAGE");

    ws.send(Message::Text(r#"{"type":"pong"}"#.into()))
        .await
        .unwrap();
    assert!(next_message(&mut ws).await.is_none());
}

#[tokio::test]
async fn test_disconnect_unregisters() {
    let app = helpers::TestApp::new().await;
    let addr = app.spawn().await;
    let (mut ws, _) = connect(addr).await;
    wait_for_connections(&app, 1).await;

    ws.close(None).await.unwrap();
    wait_for_connections(&app, 0).await;

    // Nobody listening: creation still succeeds.
    app.create_global("2024-03-10T09:00:00Z", "quiet").await;
}

#[tokio::test]
async fn test_listening_client_survives_heartbeat() {
    // Two seconds of tolerated silence, pinged every second.
    let app = helpers::TestApp::with_heartbeat(1, 1).await;
    let addr = app.spawn().await;
    let (mut ws, _) = connect(addr).await;

    // The client never writes; tungstenite answers ping frames on its own.
    let mut pings = 0;
    let deadline = tokio::time::Instant::now() + Duration::from_millis(3500);
    while let Ok(Some(frame)) = tokio::time::timeout_at(deadline, ws.next()).await {
        match frame.expect("WebSocket error") {
            Message::Ping(payload) => {
                assert!(chrono::DateTime::parse_from_rfc3339(
                    std::str::from_utf8(&payload).expect("utf-8 payload")
                )
                .is_ok());
                pings += 1;
            }
            Message::Close(_) => panic!("server closed a responsive client"),
            _ => {}
        }
    }
    assert!(pings >= 2, "expected at least two pings, got {pings}");
    assert_eq!(app.state.realtime.connections.connection_count(), 1);

    app.create_global("2024-03-10T09:00:00Z", "still here").await;
    let event = next_message(&mut ws).await.expect("no broadcast");
    assert_eq!(event["type"], "global_notifications");
}

#[tokio::test]
async fn test_broadcast_matches_day_query() {
    let app = helpers::TestApp::new().await;
    app.create_global("2024-03-10T00:00:00Z", "midnight").await;
    app.create_global("2024-03-11T00:00:00Z", "next day").await;
    app.create_targeted("E1", "2024-03-10T08:00:00Z", "private")
        .await;

    let addr = app.spawn().await;
    let (mut ws, _) = connect(addr).await;

    app.create_global("2024-03-10T05:00:00Z", "dawn").await;
    let event = next_message(&mut ws).await.expect("no broadcast");
    assert_eq!(event["date"], "2024-03-10");

    let day = app
        .request("GET", "/api/notifications/global/days/2024-03-10", None)
        .await;
    assert_eq!(day.status, StatusCode::OK);

    let by_id = |list: &Vec<Value>| {
        let mut list = list.clone();
        list.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        list
    };
    let pushed = event["notifications"].as_array().expect("notifications array");
    assert_eq!(pushed.len(), 2);
    assert_eq!(by_id(pushed), by_id(day.data_array()));
}
