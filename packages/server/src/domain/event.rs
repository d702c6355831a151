//! Outbound events
//!
//! Transport Adapter に送信を依頼するイベント。ワイヤ形式（JSON）への変換は
//! Infrastructure 層の DTO が担当します。

use serde_json::Value;

use super::{
    entity::Member,
    value_object::{ConnectionId, DisplayName, Namespace, RoomId},
};

/// Acknowledgement text sent with `left-room-ack`.
pub const LEFT_ROOM_MESSAGE: &str = "You have left the room.";

/// Error text sent when `join` carries no room id.
pub const MISSING_ROOM_MESSAGE: &str = "Room ID is required";

/// `{id, name}` pair listed in `other-users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub id: ConnectionId,
    pub name: DisplayName,
}

impl From<Member> for PeerSummary {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    /// Handshake: tells the client its own opaque id.
    Connected {
        id: ConnectionId,
        namespace: Namespace,
    },
    Error {
        message: String,
    },
    OtherUsers {
        users: Vec<PeerSummary>,
    },
    JoinedRoom {
        room_id: RoomId,
        id: ConnectionId,
    },
    UserJoined {
        id: ConnectionId,
        name: DisplayName,
    },
    UserLeft {
        id: ConnectionId,
        name: DisplayName,
    },
    /// Negotiation message; `payload` is forwarded untouched.
    Signal {
        sender_id: ConnectionId,
        sender_name: DisplayName,
        kind: Option<String>,
        payload: Value,
    },
    NewSubtitle {
        text: String,
        sender_id: ConnectionId,
        name: DisplayName,
    },
    LeftRoomAck {
        room_id: RoomId,
        message: String,
    },
}

impl OutboundEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Error { .. } => "error",
            Self::OtherUsers { .. } => "other-users",
            Self::JoinedRoom { .. } => "joined-room",
            Self::UserJoined { .. } => "user-joined",
            Self::UserLeft { .. } => "user-left",
            Self::Signal { .. } => "signal",
            Self::NewSubtitle { .. } => "new-subtitle",
            Self::LeftRoomAck { .. } => "left-room-ack",
        }
    }
}
