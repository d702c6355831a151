//! Value Objects
//!
//! 識別子や表示名などの不変な値を表す型。生成時に検証を行い、
//! 以降は常に妥当な値であることを保証します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 生成ラベルに使う ID の先頭文字数
const LABEL_ID_PREFIX_LEN: usize = 4;

/// Returns the first `LABEL_ID_PREFIX_LEN` characters of `id` (char-boundary safe).
fn id_prefix(id: &str) -> &str {
    match id.char_indices().nth(LABEL_ID_PREFIX_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Transport-assigned, opaque identifier of one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の文字列から ConnectionId を作成（空文字列は不可）
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(id))
    }

    /// 新しい一意な ConnectionId を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-supplied room key. Only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 参加者の表示名
///
/// クライアントが名前を指定しなかった場合は、接続 ID から生成したラベルを使います。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// 空白のみの名前は不可
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::DisplayNameBlank);
        }
        Ok(Self(name))
    }

    /// Converts an optional client-supplied name, discarding blank values.
    pub fn from_optional(name: Option<String>) -> Option<Self> {
        name.and_then(|name| Self::new(name).ok())
    }

    /// Default name given on join: `Guest_<id prefix>`.
    pub fn guest(id: &ConnectionId) -> Self {
        Self(format!("Guest_{}", id_prefix(id.as_str())))
    }

    /// Last-resort subtitle sender label: `User_<id prefix>`.
    pub fn fallback(id: &ConnectionId) -> Self {
        Self(format!("User_{}", id_prefix(id.as_str())))
    }

    /// Name used for a signal sender that is not in any room.
    pub fn unknown() -> Self {
        Self("Unknown".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 独立した論理チャンネル（namespace）のキー
///
/// namespace ごとに Connection Registry と Room Table の組が独立して存在し、
/// 異なる namespace 間でルームや接続が混ざることはありません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(ValueObjectError::InvalidNamespace(name));
        }
        Ok(Self(name))
    }

    /// The namespace served on the bare `/ws` endpoint.
    pub fn default_namespace() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::default_namespace()
    }
}

impl TryFrom<String> for Namespace {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in JST (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty() {
        // テスト項目: 空文字列の ConnectionId は生成できない
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = ConnectionId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ConnectionIdEmpty));
    }

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成された ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_room_id_rejects_empty() {
        // テスト項目: 空文字列の RoomId は生成できない
        // given (前提条件):

        // when (操作):
        let result = RoomId::try_from(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::RoomIdEmpty));
    }

    #[test]
    fn test_generated_labels_use_id_prefix() {
        // テスト項目: 生成ラベルは ID の先頭 4 文字から作られる
        // given (前提条件):
        let id = ConnectionId::new("abcdef123".to_string()).unwrap();

        // when (操作):
        let guest = DisplayName::guest(&id);
        let fallback = DisplayName::fallback(&id);

        // then (期待する結果):
        assert_eq!(guest.as_str(), "Guest_abcd");
        assert_eq!(fallback.as_str(), "User_abcd");
        assert_eq!(DisplayName::unknown().as_str(), "Unknown");
    }

    #[test]
    fn test_generated_labels_with_short_multibyte_id() {
        // テスト項目: 4 文字未満やマルチバイトの ID でもパニックしない
        // given (前提条件):
        let short = ConnectionId::new("ab".to_string()).unwrap();
        let multibyte = ConnectionId::new("縁側であう".to_string()).unwrap();

        // when (操作):
        let short_label = DisplayName::guest(&short);
        let multibyte_label = DisplayName::guest(&multibyte);

        // then (期待する結果):
        assert_eq!(short_label.as_str(), "Guest_ab");
        assert_eq!(multibyte_label.as_str(), "Guest_縁側であ");
    }

    #[test]
    fn test_display_name_from_optional_discards_blank() {
        // テスト項目: 空白のみの名前は指定なしとして扱われる
        // given (前提条件):

        // when (操作):
        let blank = DisplayName::from_optional(Some("   ".to_string()));
        let missing = DisplayName::from_optional(None);
        let alice = DisplayName::from_optional(Some("alice".to_string()));

        // then (期待する結果):
        assert_eq!(blank, None);
        assert_eq!(missing, None);
        assert_eq!(alice.map(DisplayName::into_string), Some("alice".to_string()));
    }

    #[test]
    fn test_namespace_validation() {
        // テスト項目: namespace は英小文字・数字・'-'・'_' のみ許可される
        // given (前提条件):

        // when (操作):
        let video = Namespace::new("video".to_string());
        let upper = Namespace::new("Video".to_string());
        let slash = Namespace::new("/video".to_string());
        let empty = Namespace::new(String::new());

        // then (期待する結果):
        assert!(video.is_ok());
        assert!(matches!(upper, Err(ValueObjectError::InvalidNamespace(_))));
        assert!(matches!(slash, Err(ValueObjectError::InvalidNamespace(_))));
        assert!(matches!(empty, Err(ValueObjectError::InvalidNamespace(_))));
        assert_eq!(Namespace::default().as_str(), "default");
    }
}
