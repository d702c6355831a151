//! UseCase テスト用のヘルパー

use std::sync::Arc;

use deai_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver},
};

use crate::{
    domain::{ConnectionId, MessagePusher, PresenceRepository, PresenceState, RoomId},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
    },
};

pub const FIXED_TIME: i64 = 1672498800000;

pub fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub fn room(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub fn create_test_repository() -> Arc<InMemoryPresenceRepository> {
    let clock = Arc::new(FixedClock::new(FIXED_TIME));
    Arc::new(InMemoryPresenceRepository::new(Arc::new(Mutex::new(
        PresenceState::new(clock),
    ))))
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::default())
}

/// 接続を登録し、その送信キューの受信側を返す
pub async fn connect(
    repository: &InMemoryPresenceRepository,
    pusher: &WebSocketMessagePusher,
    value: &str,
) -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    repository.connect(id(value), None).await;
    pusher.register_client(id(value), tx).await;
    rx
}

/// キューに溜まっているフレームをすべて取り出す
pub fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(text) = rx.try_recv() {
        frames.push(serde_json::from_str(&text).unwrap());
    }
    frames
}

/// フレームのイベント名だけを取り出す
pub fn event_names(frames: &[Value]) -> Vec<String> {
    frames
        .iter()
        .map(|frame| frame["event"].as_str().unwrap_or_default().to_string())
        .collect()
}
