//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for `GET /api/namespaces/{namespace}/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Member connection ids in join order
    pub members: Vec<String>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Member entry of [`RoomDetailDto`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub id: String,
    pub name: String,
    /// RFC 3339 (JST)
    pub joined_at: String,
}

/// Room detail for `GET /api/namespaces/{namespace}/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberDetailDto>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Namespace entry for `GET /api/namespaces`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDto {
    pub name: String,
    pub connections: usize,
    pub rooms: usize,
    /// `false` when the registry and the room table disagree
    pub consistent: bool,
}
