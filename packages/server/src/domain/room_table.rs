//! Room Table
//!
//! ルーム ID → 参加者（参加順）の対応を保持します。
//! 参加者が 0 人になったルームはその場で削除され、テーブルに空のルームは残りません。

use std::collections::HashMap;

use super::{
    entity::{Member, Room},
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// Result of [`RoomTable::add_member`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// Members as they were before the insertion (may include the joiner on re-join).
    pub previous_members: Vec<Member>,
    /// `false` when the member was already present and nothing changed.
    pub newly_added: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `member` into `room_id`, creating the room on first join.
    pub fn add_member(&mut self, room_id: &RoomId, member: Member, now: Timestamp) -> Admission {
        let room = self
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), now));
        let previous_members = room.members.clone();

        if room.contains(&member.id) {
            return Admission {
                previous_members,
                newly_added: false,
            };
        }

        room.members.push(member);
        Admission {
            previous_members,
            newly_added: true,
        }
    }

    /// Removes the member and deletes the room if it became empty.
    ///
    /// Returns the removed entry, or `None` if it was not a member.
    pub fn remove_member(&mut self, room_id: &RoomId, id: &ConnectionId) -> Option<Member> {
        let room = self.rooms.get_mut(room_id)?;
        let position = room.members.iter().position(|m| &m.id == id)?;
        let removed = room.members.remove(position);

        if room.is_empty() {
            self.rooms.remove(room_id);
        }

        Some(removed)
    }

    /// Current members in join order; empty if the room does not exist.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<Member> {
        self.rooms
            .get(room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Full scan for the room holding `id`. The registry index is the fast path.
    pub fn rooms_containing(&self, id: &ConnectionId) -> Vec<&RoomId> {
        let mut found: Vec<&RoomId> = self
            .rooms
            .values()
            .filter(|room| room.contains(id))
            .map(|room| &room.id)
            .collect();
        found.sort();
        found
    }

    /// All rooms ordered by creation time, then id.
    pub fn rooms(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::DisplayName;

    fn room(raw: &str) -> RoomId {
        RoomId::new(raw.to_string()).unwrap()
    }

    fn member(raw: &str) -> Member {
        Member::new(
            ConnectionId::new(raw.to_string()).unwrap(),
            DisplayName::new(raw.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn ids(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_add_member_creates_room_and_returns_previous_members() {
        // テスト項目: 最初の参加でルームが作られ、挿入前の参加者リストが返される
        // given (前提条件):
        let mut table = RoomTable::new();

        // when (操作):
        let first = table.add_member(&room("r1"), member("alice"), Timestamp::new(1));
        let second = table.add_member(&room("r1"), member("bob"), Timestamp::new(2));

        // then (期待する結果):
        assert!(first.previous_members.is_empty());
        assert!(first.newly_added);
        assert_eq!(ids(&second.previous_members), vec!["alice"]);
        assert_eq!(ids(&table.members_of(&room("r1"))), vec!["alice", "bob"]);
        assert_eq!(table.get(&room("r1")).unwrap().created_at, Timestamp::new(1));
    }

    #[test]
    fn test_add_member_is_idempotent() {
        // テスト項目: 既存参加者の再追加は何も変更しない
        // given (前提条件):
        let mut table = RoomTable::new();
        table.add_member(&room("r1"), member("alice"), Timestamp::new(1));

        // when (操作):
        let again = table.add_member(&room("r1"), member("alice"), Timestamp::new(2));

        // then (期待する結果):
        assert!(!again.newly_added);
        assert_eq!(table.get(&room("r1")).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_last_member_deletes_room() {
        // テスト項目: 最後の参加者を削除するとルームも削除される
        // given (前提条件):
        let mut table = RoomTable::new();
        table.add_member(&room("r1"), member("alice"), Timestamp::new(1));
        table.add_member(&room("r1"), member("bob"), Timestamp::new(2));

        // when (操作):
        let removed_alice = table.remove_member(&room("r1"), &member("alice").id);
        let still_exists = table.get(&room("r1")).is_some();
        let removed_bob = table.remove_member(&room("r1"), &member("bob").id);

        // then (期待する結果):
        assert_eq!(removed_alice.map(|m| m.name.into_string()), Some("alice".to_string()));
        assert!(still_exists);
        assert!(removed_bob.is_some());
        assert!(table.get(&room("r1")).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_member_not_found() {
        // テスト項目: 存在しないルーム・参加者の削除は None を返し、何も変更しない
        // given (前提条件):
        let mut table = RoomTable::new();
        table.add_member(&room("r1"), member("alice"), Timestamp::new(1));

        // when (操作):
        let unknown_room = table.remove_member(&room("nope"), &member("alice").id);
        let unknown_member = table.remove_member(&room("r1"), &member("bob").id);

        // then (期待する結果):
        assert!(unknown_room.is_none());
        assert!(unknown_member.is_none());
        assert_eq!(table.members_of(&room("r1")).len(), 1);
    }

    #[test]
    fn test_members_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームの参加者は空リスト
        // given (前提条件):
        let table = RoomTable::new();

        // when (操作):
        let members = table.members_of(&room("ghost"));

        // then (期待する結果):
        assert!(members.is_empty());
        assert!(table.get(&room("ghost")).is_none());
    }

    #[test]
    fn test_rooms_are_ordered_by_creation() {
        // テスト項目: ルーム一覧は作成時刻順で返される
        // given (前提条件):
        let mut table = RoomTable::new();
        table.add_member(&room("zeta"), member("alice"), Timestamp::new(1));
        table.add_member(&room("alpha"), member("bob"), Timestamp::new(2));

        // when (操作):
        let rooms = table.rooms();

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }
}
