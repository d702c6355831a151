//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成時に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Connection ID が空
    #[error("connection id must not be empty")]
    ConnectionIdEmpty,

    /// Room ID が空
    #[error("room id must not be empty")]
    RoomIdEmpty,

    /// 表示名が空（空白のみを含む）
    #[error("display name must not be blank")]
    DisplayNameBlank,

    /// Namespace の形式が不正
    #[error("invalid namespace '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidNamespace(String),
}

/// メッセージ送信（MessagePusher）で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗（受信側が既に閉じている）
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// イベントのシリアライズに失敗
    #[error("failed to encode outbound event: {0}")]
    EncodeFailed(String),
}
