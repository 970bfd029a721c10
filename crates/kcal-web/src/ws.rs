//! WebSocket upgrade handler and message dispatch.
//!
//! Each connected client receives:
//! 1. A full [`FormSnapshot`] on connect.
//! 2. A `record_saved` message and a fresh snapshot after every save.
//!
//! Clients may send `{"type":"refresh"}` to have a new snapshot broadcast.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt, stream::SplitSink};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::api::AppState;
use crate::broadcast::{WsMessage, publish};
use crate::snapshot::FormSnapshot;

/// GET /ws — WebSocket upgrade handler.
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(app): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, app: AppState) {
    let (mut sink, mut stream) = socket.split();

    // Subscribe before the initial snapshot so no save is missed in between.
    let mut broadcast_rx = app.broadcast_tx.subscribe();

    let Ok(snapshot) = app.run_blocking(FormSnapshot::load).await else {
        return;
    };
    if ws_send(&mut sink, &WsMessage::snapshot(&snapshot))
        .await
        .is_err()
    {
        return;
    }

    debug!("WebSocket client connected");

    // Spawn a task that forwards broadcast messages to this client.
    let resync_app = app.clone();
    let forward_task = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(msg) => {
                    if ws_send(&mut sink, &msg).await.is_err() {
                        break; // Client disconnected.
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Client fell behind — send a fresh snapshot to resynchronize.
                    warn!("WebSocket client lagged by {n} messages, resending snapshot");
                    let Ok(snapshot) = resync_app.run_blocking(FormSnapshot::load).await else {
                        break;
                    };
                    if ws_send(&mut sink, &WsMessage::snapshot(&snapshot))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming messages from this client.
    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => handle_client_message(&text, &app).await,
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping, pong.
        }
    }

    debug!("WebSocket client disconnected");
    forward_task.abort();
}

/// Process a JSON message received from a client.
async fn handle_client_message(text: &str, app: &AppState) {
    #[derive(serde::Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum ClientMessage {
        Refresh,
    }

    let Ok(msg) = serde_json::from_str::<ClientMessage>(text) else {
        debug!("Ignoring malformed WebSocket message");
        return;
    };

    match msg {
        ClientMessage::Refresh => {
            if let Ok(snapshot) = app.run_blocking(FormSnapshot::load).await {
                publish(&app.broadcast_tx, WsMessage::snapshot(&snapshot));
            }
        }
    }
}

/// Serialize a `WsMessage` and send it over the WebSocket sink.
async fn ws_send(sink: &mut SplitSink<WebSocket, Message>, msg: &WsMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
