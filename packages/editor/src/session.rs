//! # Edit Session
//!
//! Interactive state layered over the store: selection, debounced hover
//! tracking, and per-field coalesced updates so rapid typing commits as
//! one mutation after the input goes quiet.
//!
//! The session is poll driven. The host calls [`EditSession::poll`] on
//! its own cadence (each frame, or off a timer) and the session commits
//! whatever became due; there is no background thread.

use crate::debounce::{Coalescer, HOVER_TOGGLE_WINDOW, RICH_TEXT_COMMIT_WINDOW};
use crate::store::{FieldUpdate, TreeStore};
use crate::StoreError;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

/// One user's editing state over a document.
pub struct EditSession {
    store: TreeStore,
    selected: Vec<String>,
    hovered: Option<String>,
    hover: Coalescer<Option<String>>,
    pending_updates: HashMap<String, Coalescer<FieldUpdate>>,
}

impl EditSession {
    pub fn new(store: TreeStore) -> Self {
        Self {
            store,
            selected: Vec::new(),
            hovered: None,
            hover: Coalescer::new(HOVER_TOGGLE_WINDOW),
            pending_updates: HashMap::new(),
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Direct store access for mutations that should not be coalesced
    /// (structural edits, style changes from a picker).
    pub fn store_mut(&mut self) -> &mut TreeStore {
        &mut self.store
    }

    pub fn set_selection(&mut self, ids: Vec<String>) {
        self.selected = ids;
    }

    pub fn selection(&self) -> &[String] {
        &self.selected
    }

    /// Report a new hover target (or `None` when the pointer leaves).
    /// The hovered node only switches after the pointer settles.
    pub fn set_hover_target(&mut self, id: Option<String>, now: Instant) {
        self.hover.set_at(id, now);
    }

    pub fn hover_target(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Queue a field update to commit once the field's input goes quiet.
    /// Later writes to the same field merge into the pending patch, each
    /// changed attribute last-write-wins.
    pub fn queue_field_update(&mut self, id: &str, update: FieldUpdate, now: Instant) {
        let slot = self
            .pending_updates
            .entry(id.to_string())
            .or_insert_with(|| Coalescer::new(RICH_TEXT_COMMIT_WINDOW));
        let mut merged = slot.flush().unwrap_or_default();
        if update.value.is_some() {
            merged.value = update.value;
        }
        if update.style.is_some() {
            merged.style = update.style;
        }
        slot.set_at(merged, now);
    }

    /// Commit everything that became due by `now`. Returns the ids of
    /// fields whose updates were committed. A pending update whose field
    /// was deleted in the meantime is dropped quietly.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        if let Some(target) = self.hover.take_due(now) {
            self.hovered = target;
        }

        let mut committed = Vec::new();
        let mut due = Vec::new();
        for (id, slot) in &mut self.pending_updates {
            if let Some(update) = slot.take_due(now) {
                due.push((id.clone(), update));
            }
        }
        self.pending_updates.retain(|_, slot| slot.is_pending());

        for (id, update) in due {
            match self.store.update_field(&id, update) {
                Ok(()) => committed.push(id),
                Err(StoreError::NodeNotFound(_)) => {
                    debug!(id = id.as_str(), "dropping pending update for deleted field");
                }
                Err(err) => {
                    warn!(id = id.as_str(), %err, "pending field update rejected");
                }
            }
        }
        committed
    }

    /// Commit all pending updates immediately, windows or not. Used on
    /// shutdown and explicit save.
    pub fn flush(&mut self) -> Vec<String> {
        if let Some(target) = self.hover.flush() {
            self.hovered = target;
        }

        let mut committed = Vec::new();
        let pending = std::mem::take(&mut self.pending_updates);
        for (id, mut slot) in pending {
            if let Some(update) = slot.flush() {
                match self.store.update_field(&id, update) {
                    Ok(()) => committed.push(id),
                    Err(StoreError::NodeNotFound(_)) => {
                        debug!(id = id.as_str(), "dropping pending update for deleted field");
                    }
                    Err(err) => {
                        warn!(id = id.as_str(), %err, "pending field update rejected");
                    }
                }
            }
        }
        committed
    }

    pub fn pending_count(&self) -> usize {
        self.pending_updates.len()
    }
}
