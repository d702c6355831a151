//! Entities
//!
//! Connection と Room は ID を介してのみ互いを参照します（所有しない）。

use super::value_object::{ConnectionId, DisplayName, RoomId, Timestamp};

/// One live transport session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: DisplayName,
    /// Set iff `id` is a member of that room in the Room Table.
    pub current_room: Option<RoomId>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, name: DisplayName, connected_at: Timestamp) -> Self {
        Self {
            id,
            name,
            current_room: None,
            connected_at,
        }
    }
}

/// ルームの参加者エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(id: ConnectionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            joined_at,
        }
    }
}

/// A named rendezvous group.
///
/// `members` keeps join order. The order is informational only (listings);
/// delivery never depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub members: Vec<Member>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    pub fn member(&self, id: &ConnectionId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.member(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// IDs of every member except `exclude`, in join order.
    pub fn member_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|m| &m.id != exclude)
            .map(|m| m.id.clone())
            .collect()
    }
}
