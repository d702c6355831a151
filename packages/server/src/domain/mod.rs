//! Domain layer for the signaling relay.
//!
//! This module contains the presence state (Connection Registry + Room Table)
//! and the interfaces the use cases depend on, independent of transport and
//! wire formats.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod presence;
pub mod registry;
pub mod repository;
pub mod room_table;
pub mod value_object;

pub use entity::{Connection, Member, Room};
pub use error::{MessagePushError, ValueObjectError};
pub use event::{LEFT_ROOM_MESSAGE, MISSING_ROOM_MESSAGE, OutboundEvent, PeerSummary};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use presence::{
    ConsistencyViolation, Departure, DisconnectOutcome, JoinOutcome, PresenceState,
    SubtitleRoute, resolve_sender_name,
};
pub use registry::ConnectionRegistry;
pub use repository::PresenceRepository;
pub use room_table::{Admission, RoomTable};
pub use value_object::{ConnectionId, DisplayName, Namespace, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
