//! Ordered in-memory store for received chat records.
//!
//! The store is the single shared mutable resource in the client: the stream
//! supervisor appends into it and the UI reads snapshots out of it. Every
//! operation is a short atomic mutation behind one mutex, so no long-held
//! locks are needed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{ChatId, ChatRecord};

struct StoreInner {
    records: VecDeque<ChatRecord>,
    max_records: Option<usize>,
}

/// Ordered collection of [`ChatRecord`]s with an in-place toxicity upsert.
///
/// Records keep their arrival order for the lifetime of the session. Cloning
/// the store clones a handle to the same underlying sequence.
///
/// By default the store grows without bound for the session, matching the
/// ephemeral single-session model. Long-running deployments can cap it with
/// [`MessageStore::with_max_records`], which evicts the oldest records first.
#[derive(Clone)]
pub struct MessageStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MessageStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                records: VecDeque::new(),
                max_records: None,
            })),
        }
    }

    /// Create a store that retains at most `max` records, evicting oldest
    /// first. A `max` of zero keeps nothing.
    pub fn with_max_records(max: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                records: VecDeque::new(),
                max_records: Some(max),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A panic while holding the lock cannot leave a half-written record:
        // every mutation below is a single push or field assignment.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record at the end of the sequence.
    ///
    /// Existing records are never touched; relative order of previously
    /// appended records is preserved.
    pub fn append(&self, record: ChatRecord) {
        let mut inner = self.lock();
        inner.records.push_back(record);
        if let Some(max) = inner.max_records {
            while inner.records.len() > max {
                inner.records.pop_front();
            }
        }
    }

    /// Replace the toxicity flag of the record with the given id.
    ///
    /// Position, length, and every other field are unchanged. A missing id is
    /// a no-op, not an error; returns whether a record matched.
    pub fn upsert_toxicity(&self, chat_id: &ChatId, is_toxic: bool) -> bool {
        let mut inner = self.lock();
        match inner.records.iter_mut().find(|r| &r.chat_id == chat_id) {
            Some(record) => {
                record.is_toxic = is_toxic;
                true
            }
            None => false,
        }
    }

    /// Owned copy of the full ordered sequence, oldest first.
    ///
    /// The copy is detached from the store; mutating it has no effect on the
    /// live sequence.
    pub fn snapshot(&self) -> Vec<ChatRecord> {
        self.lock().records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
