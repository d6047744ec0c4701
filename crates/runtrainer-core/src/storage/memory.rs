//! In-memory store for local sessions and tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::WorkoutStore;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::workout::Workout;

#[derive(Debug, Default)]
struct Documents {
    /// Per identity, in insertion order.
    workouts: HashMap<Identity, Vec<Workout>>,
    progress: HashMap<Identity, BTreeSet<String>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_docs<T>(&self, f: impl FnOnce(&mut Documents) -> T) -> Result<T, StoreError> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        Ok(f(&mut docs))
    }
}

impl WorkoutStore for MemoryStore {
    fn load_custom_workouts(&self, identity: &Identity) -> Result<Vec<Workout>, StoreError> {
        self.with_docs(|docs| {
            let mut list = docs.workouts.get(identity).cloned().unwrap_or_default();
            // Newest first; later inserts win ties.
            list.reverse();
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list
        })
    }

    fn save_custom_workout(
        &self,
        identity: &Identity,
        workout: &Workout,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut stored = workout.clone();
        stored.id = id.clone();
        stored.created_at.get_or_insert_with(Utc::now);
        self.with_docs(|docs| {
            docs.workouts.entry(identity.clone()).or_default().push(stored);
        })?;
        Ok(id)
    }

    fn delete_custom_workout(&self, identity: &Identity, id: &str) -> Result<(), StoreError> {
        let removed = self.with_docs(|docs| match docs.workouts.get_mut(identity) {
            Some(list) => {
                let before = list.len();
                list.retain(|w| w.id != id);
                list.len() < before
            }
            None => false,
        })?;
        if !removed {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn load_progress(&self, identity: &Identity) -> Result<BTreeSet<String>, StoreError> {
        self.with_docs(|docs| docs.progress.get(identity).cloned().unwrap_or_default())
    }

    fn save_progress(
        &self,
        identity: &Identity,
        completed: &BTreeSet<String>,
    ) -> Result<(), StoreError> {
        self.with_docs(|docs| {
            docs.progress.insert(identity.clone(), completed.clone());
        })
    }
}
