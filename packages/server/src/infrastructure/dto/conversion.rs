//! Conversion logic between DTOs and domain entities.

use deai_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Member, OutboundEvent, PeerSummary, Room};
use crate::infrastructure::dto::{
    http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    websocket as dto,
};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<PeerSummary> for dto::PeerInfo {
    fn from(peer: PeerSummary) -> Self {
        Self {
            id: peer.id.into_string(),
            name: peer.name.into_string(),
        }
    }
}

impl From<OutboundEvent> for dto::ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::Connected { id, namespace } => Self::Connected {
                id: id.into_string(),
                namespace: namespace.as_str().to_string(),
            },
            OutboundEvent::Error { message } => Self::Error { message },
            OutboundEvent::OtherUsers { users } => Self::OtherUsers {
                users: users.into_iter().map(dto::PeerInfo::from).collect(),
            },
            OutboundEvent::JoinedRoom { room_id, id } => Self::JoinedRoom {
                room_id: room_id.into_string(),
                id: id.into_string(),
            },
            OutboundEvent::UserJoined { id, name } => Self::UserJoined {
                id: id.into_string(),
                name: name.into_string(),
            },
            OutboundEvent::UserLeft { id, name } => Self::UserLeft {
                id: id.into_string(),
                name: name.into_string(),
            },
            OutboundEvent::Signal {
                sender_id,
                sender_name,
                kind,
                payload,
            } => Self::Signal {
                sender_id: sender_id.into_string(),
                sender_name: sender_name.into_string(),
                kind,
                payload,
            },
            OutboundEvent::NewSubtitle {
                text,
                sender_id,
                name,
            } => Self::NewSubtitle {
                text,
                sender_id: sender_id.into_string(),
                name: name.into_string(),
            },
            OutboundEvent::LeftRoomAck { room_id, message } => Self::LeftRoomAck {
                room_id: room_id.into_string(),
                message,
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<&Member> for MemberDetailDto {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.as_str().to_string(),
            name: member.name.as_str().to_string(),
            joined_at: timestamp_to_jst_rfc3339(member.joined_at.value()),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|m| m.id.as_str().to_string())
                .collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            members: room.members.iter().map(MemberDetailDto::from).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DisplayName, RoomId, Timestamp};
    use serde_json::json;

    fn member(id: &str, name: &str) -> Member {
        Member::new(
            ConnectionId::new(id.to_string()).unwrap(),
            DisplayName::new(name.to_string()).unwrap(),
            Timestamp::new(1672498800000),
        )
    }

    #[test]
    fn test_other_users_event_to_dto() {
        // テスト項目: other-users イベントが id / name のリストに変換される
        // given (前提条件):
        let event = OutboundEvent::OtherUsers {
            users: vec![member("a", "Alice").into(), member("b", "Bob").into()],
        };

        // when (操作):
        let message: dto::ServerMessage = event.into();

        // then (期待する結果):
        assert_eq!(
            message,
            dto::ServerMessage::OtherUsers {
                users: vec![
                    dto::PeerInfo {
                        id: "a".to_string(),
                        name: "Alice".to_string()
                    },
                    dto::PeerInfo {
                        id: "b".to_string(),
                        name: "Bob".to_string()
                    },
                ]
            }
        );
    }

    #[test]
    fn test_signal_event_payload_is_unchanged() {
        // テスト項目: signal の payload は変換で変更されない
        // given (前提条件):
        let payload = json!({"sdp": "v=0\r\no=- 1 2 IN IP4 127.0.0.1", "nested": [1, {"x": null}]});
        let event = OutboundEvent::Signal {
            sender_id: ConnectionId::new("a".to_string()).unwrap(),
            sender_name: DisplayName::unknown(),
            kind: Some("offer".to_string()),
            payload: payload.clone(),
        };

        // when (操作):
        let message: dto::ServerMessage = event.into();

        // then (期待する結果):
        let dto::ServerMessage::Signal {
            payload: converted,
            sender_name,
            ..
        } = message
        else {
            panic!("expected signal");
        };
        assert_eq!(converted, payload);
        assert_eq!(sender_name, "Unknown");
    }

    #[test]
    fn test_room_to_detail_dto() {
        // テスト項目: Room が参加順のメンバー詳細を持つ DTO に変換される
        // given (前提条件):
        let mut room = Room::new(
            RoomId::new("r1".to_string()).unwrap(),
            Timestamp::new(1672498800000),
        );
        room.members.push(member("b", "Bob"));
        room.members.push(member("a", "Alice"));

        // when (操作):
        let detail = RoomDetailDto::from(&room);
        let summary = RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(detail.id, "r1");
        assert_eq!(detail.members[0].name, "Bob");
        assert_eq!(detail.members[1].id, "a");
        assert!(detail.created_at.starts_with("2023-01-01T00:00:00"));
        assert_eq!(summary.members, vec!["b".to_string(), "a".to_string()]);
    }
}
