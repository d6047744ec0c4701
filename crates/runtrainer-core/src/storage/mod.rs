mod config;
pub mod database;
mod memory;

pub use config::{AnnouncementsConfig, Config, SyncConfig, TimerConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConfigError, StoreError};
use crate::identity::Identity;
use crate::workout::Workout;

/// Document store scoped per identity. Stands in for the remote backend.
///
/// Progress uses full-replace semantics; the ledger only grows, so the last
/// write always carries the complete set.
pub trait WorkoutStore: Send + Sync {
    /// Custom workouts, most recently created first.
    fn load_custom_workouts(&self, identity: &Identity) -> Result<Vec<Workout>, StoreError>;

    /// Persist a new custom workout and return the id assigned to it.
    fn save_custom_workout(&self, identity: &Identity, workout: &Workout)
        -> Result<String, StoreError>;

    /// Remove a custom workout. `NotFound` when `identity` has no such id.
    fn delete_custom_workout(&self, identity: &Identity, id: &str) -> Result<(), StoreError>;

    fn load_progress(&self, identity: &Identity) -> Result<BTreeSet<String>, StoreError>;

    fn save_progress(&self, identity: &Identity, completed: &BTreeSet<String>)
        -> Result<(), StoreError>;
}

/// A store bound to one identity. Present only when the session syncs.
#[derive(Clone)]
pub struct ScopedStore {
    store: Arc<dyn WorkoutStore>,
    identity: Identity,
}

impl ScopedStore {
    pub fn new(store: Arc<dyn WorkoutStore>, identity: Identity) -> Self {
        Self { store, identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn load_custom_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        self.store.load_custom_workouts(&self.identity)
    }

    pub fn save_custom_workout(&self, workout: &Workout) -> Result<String, StoreError> {
        self.store.save_custom_workout(&self.identity, workout)
    }

    pub fn delete_custom_workout(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete_custom_workout(&self.identity, id)
    }

    pub fn load_progress(&self) -> Result<BTreeSet<String>, StoreError> {
        self.store.load_progress(&self.identity)
    }

    pub fn save_progress(&self, completed: &BTreeSet<String>) -> Result<(), StoreError> {
        self.store.save_progress(&self.identity, completed)
    }
}

impl std::fmt::Debug for ScopedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedStore")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Returns `~/.config/runtrainer[-dev]/`.
///
/// `RUNTRAINER_HOME` replaces the base directory; `RUNTRAINER_ENV=dev`
/// selects the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = match std::env::var_os("RUNTRAINER_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("RUNTRAINER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("runtrainer-dev")
    } else {
        base_dir.join("runtrainer")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
