//! WebSocket stream supervision.
//!
//! [`ChatStreamClient`] owns the connection lifecycle: it connects, decodes
//! inbound records into the message store, and reconnects after a fixed
//! delay for as long as the client is alive.

mod client;

pub use client::{ChatStreamClient, ConnectionState, StreamConfig, DEFAULT_RECONNECT_DELAY};
