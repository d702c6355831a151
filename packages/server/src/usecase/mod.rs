//! UseCase 層
//!
//! トランスポートから届く各イベントに一つのユースケースが対応します。
//! 状態の変更は `PresenceRepository` に、送信は `MessagePusher` に委譲し、
//! 送信は常に状態のロックを解放した後に行われます。

mod connect_connection;
mod delivery;
mod disconnect_connection;
pub mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod relay_core;
mod relay_signal;
mod relay_subtitle;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_connection::ConnectConnectionUseCase;
pub use delivery::DeliveryOrder;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::{
    ConnectError, GetRoomDetailError, JoinRoomError, LeaveRoomError, SignalError, SubtitleError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::{GetRoomsUseCase, NamespaceStats};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use relay_core::RelayCore;
pub use relay_signal::RelaySignalUseCase;
pub use relay_subtitle::RelaySubtitleUseCase;
