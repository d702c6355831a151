//! UseCase: ルーム参加処理
//!
//! ## 送信内容
//!
//! - 参加者本人: `other-users`（参加前のメンバーがいる場合のみ）→ `joined-room`
//! - 既存メンバー: `user-joined`（新規参加の場合のみ）
//! - 別のルームにいた場合は先に退出し、元のルームのメンバーに `user-left`
//!
//! `room` が空の場合は状態を変更せず、参加者本人にのみ `error` を返します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, MISSING_ROOM_MESSAGE, MessagePusher, OutboundEvent,
    PeerSummary, PresenceRepository, RoomId,
};

use super::{
    delivery::{self, DeliveryOrder},
    error::JoinRoomError,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `id` - 参加する接続
    /// * `room_id` - 参加先（`None` は空の room を表す）
    /// * `name` - 表示名（省略時は登録済みの名前を使う）
    pub async fn execute(
        &self,
        id: &ConnectionId,
        room_id: Option<RoomId>,
        name: Option<DisplayName>,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let _order = self.order.enter().await;
        let Some(room_id) = room_id else {
            let event = OutboundEvent::Error {
                message: MISSING_ROOM_MESSAGE.to_string(),
            };
            delivery::push(self.message_pusher.as_ref(), id, &event).await;
            return Err(JoinRoomError::MissingRoomId);
        };

        let outcome = self.repository.join(id, &room_id, name).await;
        let pusher = self.message_pusher.as_ref();

        if let Some(departure) = &outcome.previous_room {
            tracing::info!(
                connection_id = %id,
                from = %departure.room_id,
                to = %room_id,
                "left previous room before joining"
            );
            let event = OutboundEvent::UserLeft {
                id: id.clone(),
                name: departure.member.name.clone(),
            };
            delivery::fan_out(pusher, &departure.notify, &event).await;
        }

        if !outcome.other_members.is_empty() {
            let event = OutboundEvent::OtherUsers {
                users: outcome
                    .other_members
                    .iter()
                    .cloned()
                    .map(PeerSummary::from)
                    .collect(),
            };
            delivery::push(pusher, id, &event).await;
        }

        let event = OutboundEvent::UserJoined {
            id: id.clone(),
            name: outcome.joiner.name.clone(),
        };
        delivery::fan_out(pusher, &outcome.notify, &event).await;

        let event = OutboundEvent::JoinedRoom {
            room_id: room_id.clone(),
            id: id.clone(),
        };
        delivery::push(pusher, id, &event).await;

        tracing::info!(
            connection_id = %id,
            room_id = %room_id,
            name = %outcome.joiner.name,
            members = outcome.other_members.len() + 1,
            "joined room"
        );
        Ok(outcome)
    }
}
