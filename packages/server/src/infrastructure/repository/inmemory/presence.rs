//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する `PresenceRepository` trait の具体的な実装。
//! 名前空間ごとに一つの `PresenceState` を一つのロックで保護します。
//!
//! 各メソッドはロックを一度だけ取得し、状態遷移と配信先の計算を終えてから
//! 解放します。配信（`MessagePusher`）はロックの外で行われます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConsistencyViolation, Departure, DisconnectOutcome, DisplayName, JoinOutcome,
    PresenceRepository, PresenceState, Room, RoomId, SubtitleRoute, Timestamp,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    state: Arc<Mutex<PresenceState>>,
}

impl InMemoryPresenceRepository {
    pub fn new(state: Arc<Mutex<PresenceState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PresenceState::default())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn connect(&self, id: ConnectionId, name: Option<DisplayName>) -> Option<Timestamp> {
        let mut state = self.state.lock().await;
        state.connect(id, name)
    }

    async fn join(
        &self,
        id: &ConnectionId,
        room_id: &RoomId,
        name: Option<DisplayName>,
    ) -> JoinOutcome {
        let mut state = self.state.lock().await;
        state.join(id, room_id, name)
    }

    async fn leave(&self, id: &ConnectionId, room_id: &RoomId) -> Option<Departure> {
        let mut state = self.state.lock().await;
        state.leave(id, room_id)
    }

    async fn disconnect(&self, id: &ConnectionId) -> DisconnectOutcome {
        let mut state = self.state.lock().await;
        state.disconnect(id)
    }

    async fn signal_route(
        &self,
        sender: &ConnectionId,
        target: &ConnectionId,
    ) -> Option<DisplayName> {
        let state = self.state.lock().await;
        state.signal_route(sender, target)
    }

    async fn subtitle_route(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        client_supplied: Option<DisplayName>,
    ) -> SubtitleRoute {
        let state = self.state.lock().await;
        state.subtitle_route(sender, room_id, client_supplied)
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        state.rooms()
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let state = self.state.lock().await;
        state.room(room_id)
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.registry().len()
    }

    async fn check_consistency(&self) -> Vec<ConsistencyViolation> {
        let state = self.state.lock().await;
        state.check_consistency()
    }
}
