//! WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

use noticeboard_realtime::connection::heartbeat::run_heartbeat;
use noticeboard_realtime::message::OutboundMessage;

use crate::state::AppState;

/// GET /ws
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Drives an established WebSocket connection until the client leaves, the
/// heartbeat gives up, or the server shuts down.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let realtime = state.realtime;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = realtime.connections.register();
    let conn_id = handle.id;
    let mut shutdown_rx = realtime.shutdown_receiver();

    // Outbound forwarder
    let mut outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let frame = match msg {
                OutboundMessage::Ping { timestamp } => Message::Ping(timestamp.to_rfc3339().into()),
                other => match serde_json::to_string(&other) {
                    Ok(text) => Message::Text(text.into()),
                    Err(e) => {
                        error!(conn_id = %conn_id, error = %e, "Failed to serialize outbound message");
                        continue;
                    }
                },
            };
            if ws_tx.send(frame).await.is_err() {
                break;
            }
        }
    });

    let mut heartbeat_task =
        tokio::spawn(run_heartbeat(handle.clone(), realtime.heartbeat.clone()));

    loop {
        tokio::select! {
            incoming = ws_rx.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    realtime.connections.handle_inbound(&conn_id, text.as_str()).await;
                }
                Some(Ok(Message::Pong(_))) => handle.record_pong().await,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = &mut heartbeat_task => {
                debug!(conn_id = %conn_id, "Heartbeat ended");
                break;
            }
            _ = &mut outbound_task => {
                debug!(conn_id = %conn_id, "Outbound stream closed");
                break;
            }
            _ = shutdown_rx.recv() => break,
        }
    }

    heartbeat_task.abort();
    outbound_task.abort();
    realtime.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
