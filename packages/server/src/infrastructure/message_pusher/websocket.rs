//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - `OutboundEvent` を `ServerMessage` DTO 経由で JSON にエンコードして投入
//!
//! ソケットへの書き込みは UI 層（`ui/handler/websocket.rs`）の送信タスクが行います。
//! ここでの送信はキュー投入のみで、遅いクライアントが他の配信を待たせることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// Key: connection id / Value: 送信キュー
pub struct WebSocketMessagePusher {
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
        let message = ServerMessage::from(event.clone());
        serde_json::to_string(&message).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        clients.insert(client_id.into_string(), sender);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(client_id.as_str()).is_some() {
            tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
        }
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let Some(sender) = clients.get(client_id.as_str()) else {
            return Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ));
        };
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.name(), client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        if targets.is_empty() {
            return Ok(());
        }
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(target.as_str()) {
                Some(sender) => {
                    // 一部の送信失敗は許容
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push '{}' to client '{}': {}", event.name(), target, e);
                    }
                }
                None => {
                    tracing::warn!(
                        "Client '{}' not found during broadcast of '{}', skipping",
                        target,
                        event.name()
                    );
                }
            }
        }
        tracing::debug!("Broadcasted '{}' to {} client(s)", event.name(), targets.len());

        Ok(())
    }
}
