//! Presence Protocol
//!
//! Connection Registry と Room Table を一つの集約として所有し、
//! join / leave / disconnect などの複合操作を一貫した状態遷移として実行します。
//!
//! ## 状態遷移（接続ごと）
//!
//! ```text
//! Disconnected → Connected(no room) → InRoom(room_id) → Disconnected
//! ```
//!
//! 各メソッドは同期的で、呼び出し側（Repository）が一つのロックの中で呼び出します。
//! 戻り値には送信先とペイロードに必要な情報のみが含まれ、実際の送信はロック解放後に行われます。

use std::{fmt, sync::Arc};

use deai_shared::time::{Clock, SystemClock};

use super::{
    entity::{Member, Room},
    registry::ConnectionRegistry,
    room_table::RoomTable,
    value_object::{ConnectionId, DisplayName, RoomId, Timestamp},
};

/// A member leaving a room (explicit leave, auto-leave on join, or disconnect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    /// The removed entry; its name is the one broadcast in `user-left`.
    pub member: Member,
    /// Remaining members to notify.
    pub notify: Vec<ConnectionId>,
    pub room_deleted: bool,
}

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    /// The joiner as stored in the room.
    pub joiner: Member,
    /// Members present strictly before the join, never including the joiner.
    pub other_members: Vec<Member>,
    /// Recipients of `user-joined`; empty when the joiner was already a member.
    pub notify: Vec<ConnectionId>,
    /// Set when joining forced the connection out of a different room.
    pub previous_room: Option<Departure>,
}

/// Result of a disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisconnectOutcome {
    pub departure: Option<Departure>,
    /// `false` when the connection had already been cleaned up.
    pub was_registered: bool,
}

/// Routing data for a subtitle broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRoute {
    pub sender_name: DisplayName,
    pub recipients: Vec<ConnectionId>,
}

/// Disagreement between the Connection Registry and the Room Table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyViolation {
    /// A room with zero members is stored.
    EmptyRoom(RoomId),
    /// A room lists a connection whose registry entry points elsewhere (or is missing).
    UntrackedMember { id: ConnectionId, room_id: RoomId },
    /// The registry points at a room that does not list the connection.
    DanglingIndex { id: ConnectionId, room_id: RoomId },
    /// A connection is listed in more than one room.
    MultipleRooms { id: ConnectionId, rooms: Vec<RoomId> },
}

impl fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoom(room_id) => write!(f, "room '{}' has no members", room_id),
            Self::UntrackedMember { id, room_id } => write!(
                f,
                "room '{}' lists '{}' but the registry does not point at it",
                room_id, id
            ),
            Self::DanglingIndex { id, room_id } => write!(
                f,
                "registry points '{}' at room '{}' which does not list it",
                id, room_id
            ),
            Self::MultipleRooms { id, rooms } => {
                write!(f, "'{}' is listed in {} rooms", id, rooms.len())
            }
        }
    }
}

/// Resolves the name shown for a sender. Order:
///
/// 1. the sender's live entry in the Room Table,
/// 2. the name the client supplied with the event,
/// 3. the generated fallback label `User_<id prefix>`.
pub fn resolve_sender_name(
    room_entry: Option<&Member>,
    client_supplied: Option<DisplayName>,
    sender: &ConnectionId,
) -> DisplayName {
    room_entry
        .map(|member| member.name.clone())
        .or(client_supplied)
        .unwrap_or_else(|| DisplayName::fallback(sender))
}

/// In-memory presence state of one namespace.
pub struct PresenceState {
    registry: ConnectionRegistry,
    rooms: RoomTable,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenceState")
            .field("connections", &self.registry.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}

impl Default for PresenceState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl PresenceState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            rooms: RoomTable::new(),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_jst_millis())
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn room_table(&self) -> &RoomTable {
        &self.rooms
    }

    /// connect: registers the connection with no room.
    ///
    /// Returns the connection time, or `None` if the id was already registered.
    pub fn connect(&mut self, id: ConnectionId, name: Option<DisplayName>) -> Option<Timestamp> {
        let now = self.now();
        self.registry.register(id, name, now).then_some(now)
    }

    /// join: snapshot the other members, insert the joiner, update the index.
    ///
    /// A connection already in a different room leaves it first. Re-joining the
    /// same room keeps the stored entry and produces no `user-joined` recipients.
    pub fn join(
        &mut self,
        id: &ConnectionId,
        room_id: &RoomId,
        name: Option<DisplayName>,
    ) -> JoinOutcome {
        let now = self.now();
        if !self.registry.contains(id) {
            tracing::warn!(
                connection_id = %id,
                "join from unregistered connection, registering it now"
            );
            self.registry.register(id.clone(), None, now);
        }

        let already_member = self
            .rooms
            .get(room_id)
            .is_some_and(|room| room.contains(id));
        let previous_room = match self.registry.find_room_of(id).cloned() {
            // also covers an index that names `room_id` while the room does not list the connection
            Some(current) if !already_member => self.depart(id, &current),
            _ => None,
        };

        if !already_member {
            self.registry.set_name(id, name);
        }
        let joiner_name = self
            .registry
            .lookup(id)
            .map(|connection| connection.name.clone())
            .unwrap_or_else(|| DisplayName::guest(id));

        let admission = self
            .rooms
            .add_member(room_id, Member::new(id.clone(), joiner_name.clone(), now), now);
        self.registry.set_room(id, Some(room_id.clone()));

        let other_members: Vec<Member> = admission
            .previous_members
            .into_iter()
            .filter(|member| &member.id != id)
            .collect();
        let notify = if admission.newly_added {
            other_members.iter().map(|member| member.id.clone()).collect()
        } else {
            Vec::new()
        };
        let joiner = self
            .rooms
            .get(room_id)
            .and_then(|room| room.member(id))
            .cloned()
            .unwrap_or_else(|| Member::new(id.clone(), joiner_name, now));

        JoinOutcome {
            room_id: room_id.clone(),
            joiner,
            other_members,
            notify,
            previous_room,
        }
    }

    /// Explicit leave. `None` if the connection is not a tracked member of `room_id`.
    pub fn leave(&mut self, id: &ConnectionId, room_id: &RoomId) -> Option<Departure> {
        let is_member = self
            .rooms
            .get(room_id)
            .is_some_and(|room| room.contains(id));
        if !is_member {
            return None;
        }
        self.depart(id, room_id)
    }

    /// disconnect: leave the current room (if any), then unregister.
    ///
    /// Safe to call repeatedly for the same id.
    pub fn disconnect(&mut self, id: &ConnectionId) -> DisconnectOutcome {
        let departure = match self.registry.find_room_of(id).cloned() {
            Some(room_id) => self.depart(id, &room_id),
            None => None,
        };
        let was_registered = self.registry.unregister(id).is_some();
        DisconnectOutcome {
            departure,
            was_registered,
        }
    }

    /// Removes `id` from `room_id` and clears its index.
    ///
    /// When the index points at a room that does not list the connection, the index is
    /// repaired from the Room Table and the removal is retried against the room found there.
    fn depart(&mut self, id: &ConnectionId, room_id: &RoomId) -> Option<Departure> {
        if let Some(departure) = self.remove_from(id, room_id) {
            return Some(departure);
        }
        tracing::warn!(
            connection_id = %id,
            room_id = %room_id,
            "registry points at a room that does not list the connection, reconciling"
        );
        self.reconcile(id);

        let actual = self.registry.find_room_of(id).cloned()?;
        if &actual == room_id {
            return None;
        }
        self.remove_from(id, &actual)
    }

    fn remove_from(&mut self, id: &ConnectionId, room_id: &RoomId) -> Option<Departure> {
        let member = self.rooms.remove_member(room_id, id)?;
        self.registry.set_room(id, None);

        let notify = self
            .rooms
            .members_of(room_id)
            .into_iter()
            .map(|m| m.id)
            .collect();
        let room_deleted = self.rooms.get(room_id).is_none();

        Some(Departure {
            room_id: room_id.clone(),
            member,
            notify,
            room_deleted,
        })
    }

    /// Whether a signal target exists, and the sender name to tag it with.
    ///
    /// The name comes from the sender's current room entry, or `Unknown`.
    pub fn signal_route(
        &self,
        sender: &ConnectionId,
        target: &ConnectionId,
    ) -> Option<DisplayName> {
        if !self.registry.contains(target) {
            return None;
        }
        let name = self
            .registry
            .find_room_of(sender)
            .and_then(|room_id| self.rooms.get(room_id))
            .and_then(|room| room.member(sender))
            .map(|member| member.name.clone())
            .unwrap_or_else(DisplayName::unknown);
        Some(name)
    }

    /// Recipients of a subtitle: every current member of `room_id` except the sender.
    pub fn subtitle_route(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        client_supplied: Option<DisplayName>,
    ) -> SubtitleRoute {
        let room = self.rooms.get(room_id);
        let sender_name = resolve_sender_name(
            room.and_then(|room| room.member(sender)),
            client_supplied,
            sender,
        );
        let recipients = room
            .map(|room| room.member_ids_except(sender))
            .unwrap_or_default();
        SubtitleRoute {
            sender_name,
            recipients,
        }
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.rooms().into_iter().cloned().collect()
    }

    pub fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.get(room_id).cloned()
    }

    /// Repairs the registry entry of `id` from the Room Table, which is trusted.
    pub fn reconcile(&mut self, id: &ConnectionId) {
        let rooms: Vec<RoomId> = self
            .rooms
            .rooms_containing(id)
            .into_iter()
            .cloned()
            .collect();
        if rooms.len() > 1 {
            tracing::error!(
                connection_id = %id,
                rooms = ?rooms,
                "connection listed in several rooms, keeping the first"
            );
        }
        self.registry.set_room(id, rooms.into_iter().next());
    }

    /// Lists every disagreement between the registry and the room table.
    pub fn check_consistency(&self) -> Vec<ConsistencyViolation> {
        let mut violations = Vec::new();

        for room in self.rooms.rooms() {
            if room.is_empty() {
                violations.push(ConsistencyViolation::EmptyRoom(room.id.clone()));
            }
            for member in &room.members {
                if self.registry.find_room_of(&member.id) != Some(&room.id) {
                    violations.push(ConsistencyViolation::UntrackedMember {
                        id: member.id.clone(),
                        room_id: room.id.clone(),
                    });
                }
            }
        }

        for connection in self.registry.iter() {
            let containing = self.rooms.rooms_containing(&connection.id);
            if containing.len() > 1 {
                violations.push(ConsistencyViolation::MultipleRooms {
                    id: connection.id.clone(),
                    rooms: containing.into_iter().cloned().collect(),
                });
                continue;
            }
            if let Some(room_id) = &connection.current_room
                && containing.first() != Some(&room_id)
            {
                violations.push(ConsistencyViolation::DanglingIndex {
                    id: connection.id.clone(),
                    room_id: room_id.clone(),
                });
            }
        }

        violations
    }
}
