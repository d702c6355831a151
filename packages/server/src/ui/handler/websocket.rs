//! WebSocket connection handlers.
//!
//! The Transport Adapter: one logical connection per websocket. `connect` is the upgrade,
//! `disconnect` is the end of either socket task, everything else arrives as a JSON text frame.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, Namespace, RoomId},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::RelayCore,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub name: Option<String>,
}

/// `GET /ws`: the default namespace.
pub async fn default_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Response {
    upgrade(ws, &state, Namespace::DEFAULT, query)
}

/// `GET /ws/{namespace}`
pub async fn namespaced_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Response {
    upgrade(ws, &state, &namespace, query)
}

fn upgrade(ws: WebSocketUpgrade, state: &AppState, namespace: &str, query: ConnectQuery) -> Response {
    let Some(core) = state.core(namespace) else {
        tracing::warn!("Rejecting websocket for unknown namespace '{}'", namespace);
        return StatusCode::NOT_FOUND.into_response();
    };
    let name = DisplayName::from_optional(query.name);
    ws.on_upgrade(move |socket| handle_socket(socket, core, name))
}

/// Drains the connection's queue into the websocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, core: Arc<RelayCore>, name: Option<DisplayName>) {
    let id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = core.connect.execute(id.clone(), name, tx).await {
        tracing::error!(connection_id = %id, "Failed to register connection: {}", e);
        return;
    }

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let recv_core = core.clone();
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(connection_id = %recv_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text(&recv_core, &recv_id, text.as_str()).await,
                Message::Binary(bytes) => {
                    tracing::warn!(
                        connection_id = %recv_id,
                        len = bytes.len(),
                        "Dropping binary frame"
                    );
                }
                Message::Close(_) => {
                    tracing::debug!(connection_id = %recv_id, "Client requested close");
                    break;
                }
                // Ping/pong is answered by the protocol layer
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    core.disconnect.execute(&id).await;
}

/// Parses one inbound frame and runs the matching use case.
///
/// Nothing here fails the socket: unparseable frames and use-case errors are logged and dropped.
async fn handle_text(core: &RelayCore, id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(connection_id = %id, "Dropping unparseable frame: {}", e);
            return;
        }
    };
    let event = message.name();

    match message {
        ClientMessage::Join { room, name } => {
            let room_id = room.and_then(|room| RoomId::new(room).ok());
            if let Err(e) = core
                .join_room
                .execute(id, room_id, DisplayName::from_optional(name))
                .await
            {
                tracing::warn!(connection_id = %id, event, "{}", e);
            }
        }
        ClientMessage::Signal {
            target_id,
            kind,
            payload,
        } => {
            let target = target_id.and_then(|target| ConnectionId::new(target).ok());
            if let Err(e) = core.relay_signal.execute(id, target, kind, payload).await {
                tracing::warn!(connection_id = %id, event, "Dropping signal: {}", e);
            }
        }
        ClientMessage::SubtitleText {
            room,
            text,
            sender_id,
            name,
        } => {
            if let Some(claimed) = sender_id.as_deref()
                && claimed != id.as_str()
            {
                tracing::debug!(
                    connection_id = %id,
                    claimed,
                    "Ignoring client-supplied sender_id"
                );
            }
            let room_id = room.and_then(|room| RoomId::new(room).ok());
            if let Err(e) = core
                .relay_subtitle
                .execute(id, room_id, text, DisplayName::from_optional(name))
                .await
            {
                tracing::warn!(connection_id = %id, event, "Dropping subtitle: {}", e);
            }
        }
        ClientMessage::Leave { room } => {
            let room_id = room.and_then(|room| RoomId::new(room).ok());
            if let Err(e) = core.leave_room.execute(id, room_id).await {
                tracing::warn!(connection_id = %id, event, "Ignoring leave: {}", e);
            }
        }
    }
}
