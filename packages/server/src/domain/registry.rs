//! Connection Registry
//!
//! 接続 ID → 接続メタデータ（表示名・現在のルーム）の対応を保持します。
//! `current_room` は Room Table への O(1) 逆引きインデックスを兼ねます。

use std::collections::HashMap;

use super::{
    entity::Connection,
    value_object::{ConnectionId, DisplayName, RoomId, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` with no room. Idempotent: an existing entry is left untouched.
    ///
    /// Returns `true` when a new entry was created.
    pub fn register(
        &mut self,
        id: ConnectionId,
        name: Option<DisplayName>,
        connected_at: Timestamp,
    ) -> bool {
        if self.connections.contains_key(&id) {
            return false;
        }
        let name = name.unwrap_or_else(|| DisplayName::guest(&id));
        self.connections
            .insert(id.clone(), Connection::new(id, name, connected_at));
        true
    }

    /// Updates the display name. `None` and unknown connections are ignored.
    pub fn set_name(&mut self, id: &ConnectionId, name: Option<DisplayName>) {
        if let (Some(connection), Some(name)) = (self.connections.get_mut(id), name) {
            connection.name = name;
        }
    }

    /// Updates the room index. Returns `false` if the connection is unknown.
    pub fn set_room(&mut self, id: &ConnectionId, room: Option<RoomId>) -> bool {
        match self.connections.get_mut(id) {
            Some(connection) => {
                connection.current_room = room;
                true
            }
            None => false,
        }
    }

    /// Removes the connection. Callers must have finished room cleanup first.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn lookup(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn find_room_of(&self, id: &ConnectionId) -> Option<&RoomId> {
        self.connections
            .get(id)
            .and_then(|connection| connection.current_room.as_ref())
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }
}
