//! Infrastructure 層
//!
//! - `repository`: `PresenceRepository` のインメモリ実装
//! - `message_pusher`: `MessagePusher` の WebSocket 実装
//! - `dto`: ワイヤ形式（JSON）の DTO と変換

pub mod dto;
pub mod message_pusher;
pub mod repository;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{Namespace, PresenceState},
    usecase::RelayCore,
};

use self::{message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository};

/// インメモリの状態と WebSocket の送信キューで、名前空間一つ分のコアを組み立てる
pub fn in_memory_core(namespace: Namespace) -> RelayCore {
    let state = Arc::new(Mutex::new(PresenceState::default()));
    let repository = Arc::new(InMemoryPresenceRepository::new(state));
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    RelayCore::new(namespace, repository, message_pusher)
}
