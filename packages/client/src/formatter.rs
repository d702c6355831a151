//! Event formatting for client display.

use chrono::{FixedOffset, TimeZone};
use deai_server::infrastructure::dto::websocket::{PeerInfo, ServerMessage};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one relay event. `my_id` marks the client's own entries.
    pub fn format(message: &ServerMessage, my_id: Option<&str>) -> String {
        match message {
            ServerMessage::Connected { id, namespace } => Self::format_connected(id, namespace),
            ServerMessage::Error { message } => format!("\n! {}\n", message),
            ServerMessage::OtherUsers { users } => Self::format_other_users(users, my_id),
            ServerMessage::JoinedRoom { room_id, .. } => {
                format!("\n* joined room '{}'\n", room_id)
            }
            ServerMessage::UserJoined { id, name } => format!("\n+ {} ({}) joined\n", name, id),
            ServerMessage::UserLeft { id, name } => format!("\n- {} ({}) left\n", name, id),
            ServerMessage::Signal {
                sender_id,
                sender_name,
                kind,
                payload,
            } => format!(
                "\n<< signal '{}' from {} ({}): {}\n",
                kind.as_deref().unwrap_or("-"),
                sender_name,
                sender_id,
                payload
            ),
            ServerMessage::NewSubtitle {
                text,
                sender_id: _,
                name,
            } => format!("\n@{}: {}\n", name, text),
            ServerMessage::LeftRoomAck { room_id, message } => {
                format!("\n* {} ({})\n", message, room_id)
            }
        }
    }

    pub fn format_connected(id: &str, namespace: &str) -> String {
        format!(
            "\nConnected to namespace '{}' as {}\n\
             Type text to send subtitles, /signal <id> <type> <json>, /join <room>, /leave, /quit\n",
            namespace, id
        )
    }

    pub fn format_other_users(users: &[PeerInfo], my_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(RULE);
        output.push_str("\nIn this room:\n");
        for user in users {
            let me_suffix = if Some(user.id.as_str()) == my_id {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!("{} - {}{}\n", user.name, user.id, me_suffix));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// `HH:MM:SS` in JST for a Unix timestamp in milliseconds
    pub fn format_clock(timestamp_millis: i64) -> String {
        let Some(jst) = FixedOffset::east_opt(9 * 3600) else {
            return String::from("--:--:--");
        };
        match jst.timestamp_millis_opt(timestamp_millis).single() {
            Some(dt) => dt.format("%H:%M:%S").to_string(),
            None => String::from("--:--:--"),
        }
    }

    /// Format a confirmation after sending
    pub fn format_sent_confirmation(event: &str, sent_at: i64) -> String {
        format!("{} sent at {}\n", event, Self::format_clock(sent_at))
    }

    /// Format a raw text frame (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// Format a binary frame notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }
}
