//! 送信の失敗は呼び出し元に伝播させず、診断ログとして残す。
//!
//! 状態遷移とその配信は `DeliveryOrder` の中で一続きに行い、各クライアントは
//! 状態遷移が起きた順にイベントを受け取る。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent};

/// 名前空間ごとの配信順序
///
/// 保持している間に行った状態遷移と送信キューへの投入は、他のイベントと交差しない。
#[derive(Debug, Clone, Default)]
pub struct DeliveryOrder(Arc<Mutex<()>>);

impl DeliveryOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}

pub(crate) async fn push(pusher: &dyn MessagePusher, to: &ConnectionId, event: &OutboundEvent) {
    if let Err(e) = pusher.push_to(to, event).await {
        tracing::warn!(
            connection_id = %to,
            event = event.name(),
            "failed to deliver event: {}",
            e
        );
    }
}

pub(crate) async fn fan_out(
    pusher: &dyn MessagePusher,
    targets: &[ConnectionId],
    event: &OutboundEvent,
) {
    if targets.is_empty() {
        return;
    }
    if let Err(e) = pusher.broadcast(targets, event).await {
        tracing::warn!(
            event = event.name(),
            targets = targets.len(),
            "failed to broadcast event: {}",
            e
        );
    }
}
