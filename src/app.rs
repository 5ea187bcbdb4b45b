//! Application state and input handling.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::events::AppEvent;
use crate::layout::{ReservedColumns, Viewport};
use crate::models::ChatRecord;
use crate::moderation::{spawn_toxicity_sync, ModerationApi, ToxicityUpdate};
use crate::store::MessageStore;
use crate::ws::ConnectionState;

/// Top-level state for the UI loop.
///
/// The app owns a handle to the shared [`MessageStore`] but reads it only
/// through snapshots; the stream supervisor is the sole writer of new
/// records.
pub struct App {
    pub channel: String,
    pub store: MessageStore,
    pub connection_state: ConnectionState,
    pub viewport: Viewport,
    /// Cursor into the latest-first display list; 0 is the newest record.
    pub selected: usize,
    pub should_quit: bool,
    moderation: Arc<dyn ModerationApi>,
}

impl App {
    pub fn new(config: &Config, store: MessageStore, moderation: Arc<dyn ModerationApi>) -> Self {
        Self {
            channel: config.channel.clone(),
            store,
            connection_state: ConnectionState::Disconnected,
            viewport: Viewport::new(ReservedColumns::terminal()),
            selected: 0,
            should_quit: false,
            moderation,
        }
    }

    /// The records in display order: latest first.
    pub fn display_records(&self) -> Vec<ChatRecord> {
        let mut records = self.store.snapshot();
        records.reverse();
        records
    }

    pub fn selected_record(&self) -> Option<ChatRecord> {
        self.display_records().into_iter().nth(self.selected)
    }

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RecordArrived(_) => self.clamp_selection(),
            AppEvent::Connectivity(state) => self.connection_state = state,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Char('t') | KeyCode::Enter => self.toggle_selected_toxicity(),
            _ => {}
        }
    }

    /// Resize handler; also called once on mount with the initial width.
    pub fn on_resize(&mut self, width: u16) {
        self.viewport.set_container_width(width as f64);
    }

    /// Flip the toxicity flag of the selected record.
    ///
    /// The store is updated first, so the next draw reflects the toggle
    /// immediately; the moderation call runs on its own task afterwards.
    pub fn toggle_selected_toxicity(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let is_toxic = !record.is_toxic;
        self.store.upsert_toxicity(&record.chat_id, is_toxic);
        spawn_toxicity_sync(
            self.moderation.clone(),
            ToxicityUpdate {
                channel: self.channel.clone(),
                chat_id: record.chat_id,
                is_toxic,
                timestamp: record.timestamp,
            },
        );
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
