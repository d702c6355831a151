//! UseCase: ルーム一覧・名前空間の統計の取得

use std::sync::Arc;

use crate::domain::{PresenceRepository, Room};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn PresenceRepository>,
}

/// 名前空間ごとの接続数とルーム数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceStats {
    pub connections: usize,
    pub rooms: usize,
    /// Registry と Room Table の不整合の数（正常時は 0）
    pub inconsistencies: usize,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 全ルーム（作成順）
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }

    /// 統計を取得し、不整合があればログに残す
    pub async fn stats(&self) -> NamespaceStats {
        let violations = self.repository.check_consistency().await;
        for violation in &violations {
            tracing::error!("presence state inconsistency: {}", violation);
        }
        NamespaceStats {
            connections: self.repository.count_connections().await,
            rooms: self.repository.get_rooms().await.len(),
            inconsistencies: violations.len(),
        }
    }
}
