//! Chatwatch - a terminal client for live chat moderation
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod config;
pub mod events;
pub mod layout;
pub mod models;
pub mod moderation;
pub mod store;
pub mod ui;
pub mod ws;
