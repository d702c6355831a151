//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 送信は非ブロッキングなキュー投入であり、ソケットへの書き込みは接続ごとの
//! タスクが行います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, OutboundEvent};

/// 接続ごとの送信キュー（エンコード済み JSON テキスト）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信キューを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信キューを登録解除
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
