//! 名前空間ごとのリレーコア
//!
//! 一つの名前空間は独立した `PresenceRepository` と `MessagePusher` を持ち、
//! 他の名前空間と状態を共有しません。

use std::sync::Arc;

use crate::domain::{MessagePusher, Namespace, PresenceRepository};

use super::{
    ConnectConnectionUseCase, DeliveryOrder, DisconnectConnectionUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, RelaySignalUseCase, RelaySubtitleUseCase,
};

/// 一つの名前空間のユースケース一式
pub struct RelayCore {
    pub namespace: Namespace,
    pub connect: ConnectConnectionUseCase,
    pub join_room: JoinRoomUseCase,
    pub leave_room: LeaveRoomUseCase,
    pub disconnect: DisconnectConnectionUseCase,
    pub relay_signal: RelaySignalUseCase,
    pub relay_subtitle: RelaySubtitleUseCase,
    pub get_rooms: GetRoomsUseCase,
    pub get_room_detail: GetRoomDetailUseCase,
}

impl RelayCore {
    pub fn new(
        namespace: Namespace,
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        // one order shared by every event of the namespace
        let order = DeliveryOrder::new();
        Self {
            connect: ConnectConnectionUseCase::new(
                namespace.clone(),
                repository.clone(),
                message_pusher.clone(),
                order.clone(),
            ),
            join_room: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                order.clone(),
            ),
            leave_room: LeaveRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                order.clone(),
            ),
            disconnect: DisconnectConnectionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                order.clone(),
            ),
            relay_signal: RelaySignalUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                order.clone(),
            ),
            relay_subtitle: RelaySubtitleUseCase::new(repository.clone(), message_pusher, order),
            get_rooms: GetRoomsUseCase::new(repository.clone()),
            get_room_detail: GetRoomDetailUseCase::new(repository),
            namespace,
        }
    }
}
