//! UseCase: シグナル中継
//!
//! ネゴシエーションメッセージ（offer / answer / candidate など）を宛先の接続にだけ転送します。
//! `payload` は解釈も変更もしません。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent, PresenceRepository};

use super::{
    delivery::{self, DeliveryOrder},
    error::SignalError,
};

/// シグナル中継のユースケース
pub struct RelaySignalUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl RelaySignalUseCase {
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

    /// シグナルを宛先に転送する
    ///
    /// 送信者名は転送時点のルームのエントリから取得し、どのルームにもいなければ `Unknown`。
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 転送先
    /// * `Err(SignalError)` - 宛先なし、または宛先が接続していない（どちらも何も送信しない）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        target: Option<ConnectionId>,
        kind: Option<String>,
        payload: Value,
    ) -> Result<ConnectionId, SignalError> {
        let target = target.ok_or(SignalError::MissingTarget)?;
        let _order = self.order.enter().await;

        let sender_name = self
            .repository
            .signal_route(sender, &target)
            .await
            .ok_or_else(|| SignalError::TargetNotFound(target.as_str().to_string()))?;

        let event = OutboundEvent::Signal {
            sender_id: sender.clone(),
            sender_name,
            kind,
            payload,
        };
        delivery::push(self.message_pusher.as_ref(), &target, &event).await;

        tracing::debug!(
            connection_id = %sender,
            target_id = %target,
            "signal relayed"
        );
        Ok(target)
    }
}
