//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{PresenceRepository, Room, RoomId};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomDetailError> {
        self.repository
            .get_room(room_id)
            .await
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(room_id.as_str().to_string()))
    }
}
