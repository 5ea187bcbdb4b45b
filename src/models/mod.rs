//! Core data types shared across the client.

mod chat;

pub use chat::{format_timestamp, ChatId, ChatRecord};
