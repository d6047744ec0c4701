//! Completed-workout ledger.
//!
//! The ledger only grows. Every mutation writes the full set back to the
//! store; a failed write is logged and the in-memory update is kept.

use std::collections::BTreeSet;

use crate::storage::ScopedStore;

#[derive(Debug, Default)]
pub struct ProgressLedger {
    completed: BTreeSet<String>,
    store: Option<ScopedStore>,
    /// False until the stored set has been read once. Writing before that
    /// would replace remote progress with a partial set.
    synced: bool,
}

impl ProgressLedger {
    /// Ledger for a local-only session. Nothing is persisted.
    pub fn local() -> Self {
        Self {
            synced: true,
            ..Self::default()
        }
    }

    /// Load the stored set. A failed read leaves the ledger empty and is
    /// retried on the next completion.
    pub fn load(store: ScopedStore) -> Self {
        let mut ledger = Self {
            completed: BTreeSet::new(),
            store: Some(store),
            synced: false,
        };
        ledger.sync();
        ledger
    }

    fn sync(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.load_progress() {
            Ok(stored) => {
                self.completed.extend(stored);
                self.synced = true;
            }
            Err(e) => {
                tracing::warn!(identity = %store.identity(), error = %e, "could not load progress");
            }
        }
    }

    /// Add `workout_id`. Returns false if it was already recorded.
    pub fn record_completion(&mut self, workout_id: &str) -> bool {
        if self.completed.contains(workout_id) {
            return false;
        }
        self.completed.insert(workout_id.to_string());
        tracing::info!(workout_id, total = self.completed.len(), "workout completed");

        if !self.synced {
            self.sync();
        }
        if let (Some(store), true) = (&self.store, self.synced) {
            if let Err(e) = store.save_progress(&self.completed) {
                tracing::warn!(workout_id, error = %e, "progress not persisted");
            }
        }
        true
    }

    pub fn is_completed(&self, workout_id: &str) -> bool {
        self.completed.contains(workout_id)
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
