//! UseCase: ルーム退出処理
//!
//! 退出したメンバーの名前を付けて残りのメンバーに `user-left` を送り、
//! 本人には `left-room-ack` を返します。最後のメンバーが退出したルームは削除されます。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Departure, LEFT_ROOM_MESSAGE, MessagePusher, OutboundEvent, PresenceRepository,
    RoomId,
};

use super::{
    delivery::{self, DeliveryOrder},
    error::LeaveRoomError,
};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl LeaveRoomUseCase {
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

    /// ルーム退出を実行
    ///
    /// メンバーでない場合は `NotAMember` を返し、何も送信しない。
    pub async fn execute(
        &self,
        id: &ConnectionId,
        room_id: Option<RoomId>,
    ) -> Result<Departure, LeaveRoomError> {
        let room_id = room_id.ok_or(LeaveRoomError::MissingRoomId)?;
        let _order = self.order.enter().await;

        let departure = self.repository.leave(id, &room_id).await.ok_or_else(|| {
            LeaveRoomError::NotAMember {
                connection_id: id.as_str().to_string(),
                room_id: room_id.as_str().to_string(),
            }
        })?;

        let pusher = self.message_pusher.as_ref();
        let event = OutboundEvent::UserLeft {
            id: id.clone(),
            name: departure.member.name.clone(),
        };
        delivery::fan_out(pusher, &departure.notify, &event).await;

        let ack = OutboundEvent::LeftRoomAck {
            room_id: room_id.clone(),
            message: LEFT_ROOM_MESSAGE.to_string(),
        };
        delivery::push(pusher, id, &ack).await;

        tracing::info!(
            connection_id = %id,
            room_id = %room_id,
            room_deleted = departure.room_deleted,
            "left room"
        );
        Ok(departure)
    }
}
