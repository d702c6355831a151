//! UseCase 層のエラー定義
//!
//! `JoinRoomError::MissingRoomId` 以外はクライアントに通知されず、
//! UI 層でログに記録されて破棄されます。

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    AlreadyConnected(String),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("room id is missing")]
    MissingRoomId,
}

/// ルーム退出のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveRoomError {
    #[error("room id is missing")]
    MissingRoomId,
    #[error("connection '{connection_id}' is not a member of room '{room_id}'")]
    NotAMember {
        connection_id: String,
        room_id: String,
    },
}

/// シグナル中継のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("target_id is missing")]
    MissingTarget,
    #[error("target '{0}' is not connected")]
    TargetNotFound(String),
}

/// 字幕中継のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubtitleError {
    #[error("room is missing")]
    MissingRoom,
    #[error("text is missing")]
    MissingText,
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
