//! Inbound chat event types.

use std::fmt;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Opaque chat message identifier.
///
/// The stream delivers ids as either JSON strings or JSON integers depending
/// on the producer; both forms are accepted and kept as-received. Equality is
/// on the decoded value, so an id is stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Text(String),
    Number(i64),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Text(s) => write!(f, "{}", s),
            ChatId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        ChatId::Text(s.to_string())
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        ChatId::Text(s)
    }
}

impl From<i64> for ChatId {
    fn from(n: i64) -> Self {
        ChatId::Number(n)
    }
}

/// One decoded inbound chat event.
///
/// `is_toxic` is the only field that is ever mutated after insertion, and
/// only through [`crate::store::MessageStore::upsert_toxicity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub chat_id: ChatId,
    /// Send time as epoch milliseconds.
    pub timestamp: i64,
    /// Display name; may be empty or absent on the wire.
    #[serde(default)]
    pub username: String,
    pub chat_message: String,
    /// Moderation flag; absent on arrival means not toxic.
    #[serde(default)]
    pub is_toxic: bool,
}

/// Format an epoch-millisecond timestamp as local `HH:MM:SS`.
///
/// Out-of-range timestamps render as `--:--:--` rather than failing.
pub fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_string_id() {
        let json = r#"{"chat_id":"abc-1","timestamp":1700000000000,"username":"sam","chat_message":"hi"}"#;
        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chat_id, ChatId::from("abc-1"));
        assert_eq!(record.username, "sam");
        assert!(!record.is_toxic);
    }

    #[test]
    fn test_decode_integer_id() {
        let json = r#"{"chat_id":42,"timestamp":1700000000000,"chat_message":"hi"}"#;
        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chat_id, ChatId::from(42));
        assert_eq!(record.username, "");
    }

    #[test]
    fn test_decode_explicit_toxic_flag() {
        let json =
            r#"{"chat_id":"x","timestamp":1,"username":"","chat_message":"bad","is_toxic":true}"#;
        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_toxic);
    }

    #[test]
    fn test_decode_missing_message_is_error() {
        let json = r#"{"chat_id":"x","timestamp":1}"#;
        assert!(serde_json::from_str::<ChatRecord>(json).is_err());
    }

    #[test]
    fn test_chat_id_display() {
        assert_eq!(ChatId::from("abc").to_string(), "abc");
        assert_eq!(ChatId::from(7).to_string(), "7");
    }

    #[test]
    fn test_string_and_integer_ids_are_distinct() {
        assert_ne!(ChatId::from("1"), ChatId::from(1));
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(1700000000000);
        assert_eq!(formatted.len(), 8);
        assert_eq!(formatted.as_bytes()[2], b':');
        assert_eq!(formatted.as_bytes()[5], b':');
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "--:--:--");
    }
}
