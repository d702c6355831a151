//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by its `"event"` field, e.g.
//!
//! ```text
//! {"event":"join","room":"r1","name":"alice"}
//! {"event":"user-joined","id":"6f1c…","name":"alice"}
//! ```
//!
//! Inbound fields are optional: a missing field is a protocol-level condition handled by
//! the use cases (error event or silent drop), not a parse error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Signal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_id: Option<String>,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default)]
        payload: Value,
    },
    SubtitleText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Leave {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
    },
}

impl ClientMessage {
    /// Wire name of the event, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Signal { .. } => "signal",
            Self::SubtitleText { .. } => "subtitle-text",
            Self::Leave { .. } => "leave",
        }
    }
}

/// `{id, name}` entry of `other-users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub id: String,
    pub name: String,
}

/// Events sent by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerMessage {
    Connected {
        id: String,
        namespace: String,
    },
    Error {
        message: String,
    },
    OtherUsers {
        users: Vec<PeerInfo>,
    },
    JoinedRoom {
        room_id: String,
        id: String,
    },
    UserJoined {
        id: String,
        name: String,
    },
    UserLeft {
        id: String,
        name: String,
    },
    Signal {
        sender_id: String,
        sender_name: String,
        #[serde(rename = "type")]
        kind: Option<String>,
        payload: Value,
    },
    NewSubtitle {
        text: String,
        sender_id: String,
        name: String,
    },
    LeftRoomAck {
        room_id: String,
        message: String,
    },
}
