//! UseCase: 接続処理
//!
//! トランスポートから新しい接続が通知されたときに、Connection Registry へ登録し
//! （ルームなし）、送信キューを MessagePusher に登録します。ブロードキャストは行いません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, MessagePusher, Namespace, OutboundEvent, PresenceRepository,
    PusherChannel, Timestamp,
};

use super::{
    delivery::{self, DeliveryOrder},
    error::ConnectError,
};

/// 接続のユースケース
pub struct ConnectConnectionUseCase {
    namespace: Namespace,
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl ConnectConnectionUseCase {
    pub fn new(
        namespace: Namespace,
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        order: DeliveryOrder,
    ) -> Self {
        Self {
            namespace,
            repository,
            message_pusher,
            order,
        }
    }

    /// 接続を登録し、`connected` イベントで id を通知する
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError::AlreadyConnected)` - 同じ id が登録済み（状態は変更されない）
    pub async fn execute(
        &self,
        id: ConnectionId,
        name: Option<DisplayName>,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let _order = self.order.enter().await;
        let connected_at = self
            .repository
            .connect(id.clone(), name)
            .await
            .ok_or_else(|| ConnectError::AlreadyConnected(id.as_str().to_string()))?;

        self.message_pusher.register_client(id.clone(), sender).await;

        let event = OutboundEvent::Connected {
            id: id.clone(),
            namespace: self.namespace.clone(),
        };
        delivery::push(self.message_pusher.as_ref(), &id, &event).await;

        tracing::info!(
            namespace = %self.namespace,
            connection_id = %id,
            "connection registered"
        );
        Ok(connected_at)
    }
}
