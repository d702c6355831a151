//! Repository trait 定義
//!
//! ドメイン層が必要とする状態アクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは一つの状態遷移を不可分に実行します。実装は呼び出しごとに
//! ロックを一度だけ取得し、戻り値を返す前に解放しなければなりません。

use async_trait::async_trait;

use super::{
    ConnectionId, ConsistencyViolation, Departure, DisconnectOutcome, DisplayName, JoinOutcome,
    Room, RoomId, SubtitleRoute, Timestamp,
};

/// Presence Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 接続を登録（ルームなし）。既に登録済みなら `None`
    async fn connect(&self, id: ConnectionId, name: Option<DisplayName>) -> Option<Timestamp>;

    /// ルームに参加（別のルームにいれば先に退出）
    async fn join(
        &self,
        id: &ConnectionId,
        room_id: &RoomId,
        name: Option<DisplayName>,
    ) -> JoinOutcome;

    /// ルームから退出。参加していなければ `None`
    async fn leave(&self, id: &ConnectionId, room_id: &RoomId) -> Option<Departure>;

    /// 接続を切断（ルームからの退出 → 登録解除）
    async fn disconnect(&self, id: &ConnectionId) -> DisconnectOutcome;

    /// シグナルの宛先が存在すれば、送信者名を返す
    async fn signal_route(
        &self,
        sender: &ConnectionId,
        target: &ConnectionId,
    ) -> Option<DisplayName>;

    /// 字幕の配信先と送信者名を返す
    async fn subtitle_route(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        client_supplied: Option<DisplayName>,
    ) -> SubtitleRoute;

    /// 全ルームを取得（作成順）
    async fn get_rooms(&self) -> Vec<Room>;

    /// ルームを取得
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// 接続中のクライアント数を取得
    async fn count_connections(&self) -> usize;

    /// Registry と Room Table の不整合を列挙
    async fn check_consistency(&self) -> Vec<ConsistencyViolation>;
}
