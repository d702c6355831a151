//! UseCase: 切断処理
//!
//! 接続が属するルームがあれば退出と同じ手順（削除 → `user-left` → 空なら削除）を行い、
//! その後 Connection Registry から登録を解除します。
//!
//! 同じ id で二度呼ばれても、二度目は何も送信しません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisconnectOutcome, MessagePusher, OutboundEvent, PresenceRepository,
};

use super::delivery::{self, DeliveryOrder};

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl DisconnectConnectionUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        order: DeliveryOrder,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            order,
        }
    }

    /// 切断を実行
    pub async fn execute(&self, id: &ConnectionId) -> DisconnectOutcome {
        let _order = self.order.enter().await;
        let outcome = self.repository.disconnect(id).await;
        self.message_pusher.unregister_client(id).await;

        if let Some(departure) = &outcome.departure {
            let event = OutboundEvent::UserLeft {
                id: id.clone(),
                name: departure.member.name.clone(),
            };
            delivery::fan_out(self.message_pusher.as_ref(), &departure.notify, &event).await;
            tracing::info!(
                connection_id = %id,
                room_id = %departure.room_id,
                room_deleted = departure.room_deleted,
                "disconnected from room"
            );
        }

        if outcome.was_registered {
            tracing::info!(connection_id = %id, "connection unregistered");
        } else {
            tracing::debug!(connection_id = %id, "disconnect for unknown connection ignored");
        }
        outcome
    }
}
