//! Lines typed at the prompt.
//!
//! ```text
//! hello everyone                     subtitle to the current room
//! /signal <target_id> <type> <json>  negotiation message to one peer
//! /join <room>                       join (or switch to) a room
//! /leave                             leave the current room
//! /quit                              exit
//! ```

use deai_server::infrastructure::dto::websocket::ClientMessage;
use serde_json::Value;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Subtitle(String),
    Signal {
        target_id: String,
        kind: String,
        payload: Value,
    },
    Join(String),
    Leave,
    Quit,
}

/// Parse one non-empty, trimmed input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Subtitle(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "quit" | "exit" => Ok(Command::Quit),
        "leave" => Ok(Command::Leave),
        "join" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument("room"));
            }
            Ok(Command::Join(args.to_string()))
        }
        "signal" => parse_signal(args),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn parse_signal(args: &str) -> Result<Command, CommandError> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let target_id = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(CommandError::MissingArgument("target_id"))?;
    let kind = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(CommandError::MissingArgument("type"))?;
    let payload = match parts.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| CommandError::InvalidPayload(e.to_string()))?,
        None => Value::Object(Default::default()),
    };

    Ok(Command::Signal {
        target_id: target_id.to_string(),
        kind: kind.to_string(),
        payload,
    })
}

impl Command {
    /// The frame to send, given the room the client is currently in.
    ///
    /// `None` for `/quit`, and for commands that need a room while in none.
    pub fn to_message(&self, current_room: Option<&str>, name: Option<&str>) -> Option<ClientMessage> {
        match self {
            Command::Subtitle(text) => Some(ClientMessage::SubtitleText {
                room: Some(current_room?.to_string()),
                text: Some(text.clone()),
                sender_id: None,
                name: name.map(str::to_string),
            }),
            Command::Signal {
                target_id,
                kind,
                payload,
            } => Some(ClientMessage::Signal {
                target_id: Some(target_id.clone()),
                kind: Some(kind.clone()),
                payload: payload.clone(),
            }),
            Command::Join(room) => Some(ClientMessage::Join {
                room: Some(room.clone()),
                name: name.map(str::to_string),
            }),
            Command::Leave => Some(ClientMessage::Leave {
                room: Some(current_room?.to_string()),
            }),
            Command::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_is_subtitle() {
        // テスト項目: スラッシュで始まらない行は字幕になる
        // when (操作):
        let command = parse_command("hello there").unwrap();

        // then (期待する結果):
        assert_eq!(command, Command::Subtitle("hello there".to_string()));
    }

    #[test]
    fn test_parse_signal_with_json_payload() {
        // テスト項目: /signal の第 3 引数以降が JSON として payload になる
        // when (操作):
        let command =
            parse_command(r#"/signal 6f1c offer {"sdp": "v=0 o=- 1 2", "n": [1, 2]}"#).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Signal {
                target_id: "6f1c".to_string(),
                kind: "offer".to_string(),
                payload: json!({"sdp": "v=0 o=- 1 2", "n": [1, 2]}),
            }
        );
    }

    #[test]
    fn test_parse_signal_without_payload_defaults_to_empty_object() {
        // テスト項目: payload を省略した /signal は空オブジェクトになる
        // when (操作):
        let command = parse_command("/signal 6f1c bye").unwrap();

        // then (期待する結果):
        let Command::Signal { payload, .. } = command else {
            panic!("expected signal");
        };
        assert_eq!(payload, json!({}));
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 引数不足・不正な JSON・未知のコマンドはエラーになる
        // when (操作) / then (期待する結果):
        assert_eq!(
            parse_command("/join"),
            Err(CommandError::MissingArgument("room"))
        );
        assert_eq!(
            parse_command("/signal"),
            Err(CommandError::MissingArgument("target_id"))
        );
        assert_eq!(
            parse_command("/signal abc"),
            Err(CommandError::MissingArgument("type"))
        );
        assert!(matches!(
            parse_command("/signal abc offer {broken"),
            Err(CommandError::InvalidPayload(_))
        ));
        assert_eq!(
            parse_command("/dance now"),
            Err(CommandError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn test_join_leave_quit() {
        // テスト項目: /join /leave /quit が解釈される
        // when (操作) / then (期待する結果):
        assert_eq!(
            parse_command("/join  lobby "),
            Ok(Command::Join("lobby".to_string()))
        );
        assert_eq!(parse_command("/leave"), Ok(Command::Leave));
        assert_eq!(parse_command("/quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_to_message_needs_room_for_subtitle_and_leave() {
        // テスト項目: ルームにいないときは字幕と退出のフレームを作らない
        // given (前提条件):
        let subtitle = Command::Subtitle("hi".to_string());

        // when (操作):
        let outside = subtitle.to_message(None, Some("alice"));
        let inside = subtitle.to_message(Some("r1"), Some("alice"));

        // then (期待する結果):
        assert_eq!(outside, None);
        assert_eq!(Command::Leave.to_message(None, Some("alice")), None);
        assert_eq!(
            inside,
            Some(ClientMessage::SubtitleText {
                room: Some("r1".to_string()),
                text: Some("hi".to_string()),
                sender_id: None,
                name: Some("alice".to_string()),
            })
        );
    }
}
