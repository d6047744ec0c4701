//! Generated plans plus the user's custom workouts, addressable by id.

use chrono::Utc;

use crate::error::{CoreError, Result, StoreError, ValidationError};
use crate::plans::generated_workouts;
use crate::storage::ScopedStore;
use crate::workout::{Category, Workout, WorkoutStructure};

#[derive(Debug)]
pub struct Catalog {
    generated: Vec<Workout>,
    /// Newest first.
    custom: Vec<Workout>,
    store: Option<ScopedStore>,
}

impl Catalog {
    /// Generated plans only. Custom workouts cannot be created.
    pub fn local() -> Self {
        Self {
            generated: generated_workouts(),
            custom: Vec::new(),
            store: None,
        }
    }

    /// Generated plans plus the stored custom workouts. A failed read is
    /// logged and leaves the custom list empty.
    pub fn load(store: ScopedStore) -> Self {
        let mut catalog = Self {
            generated: generated_workouts(),
            custom: Vec::new(),
            store: Some(store),
        };
        if let Err(e) = catalog.refresh() {
            tracing::warn!(error = %e, "could not load custom workouts");
        }
        catalog
    }

    /// Re-read custom workouts from the store.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        if let Some(store) = &self.store {
            self.custom = store.load_custom_workouts()?;
            tracing::debug!(count = self.custom.len(), "custom workouts loaded");
        }
        Ok(())
    }

    /// Workouts in `category`. Custom entries come most recently created first.
    pub fn list(&self, category: Category) -> Vec<&Workout> {
        if category == Category::Custom {
            return self.custom.iter().collect();
        }
        self.generated
            .iter()
            .filter(|w| w.category == category)
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.custom
            .iter()
            .chain(self.generated.iter())
            .find(|w| w.id == id)
    }

    /// Validate and persist a new custom workout.
    ///
    /// # Errors
    ///
    /// Rejects an empty title or a structure with zero-length steps or loops.
    /// Store failures are returned so the caller can tell the user the
    /// workout was not saved.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        structure: WorkoutStructure,
    ) -> Result<Workout> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        structure.validate()?;
        let store = self.store.as_ref().ok_or(StoreError::NoIdentity)?;

        let mut workout = Workout {
            id: String::new(),
            category: Category::Custom,
            title: title.to_string(),
            description: description.trim().to_string(),
            structure,
            created_at: Some(Utc::now()),
        };
        workout.id = store.save_custom_workout(&workout)?;
        tracing::info!(id = %workout.id, title = %workout.title, "custom workout saved");

        self.custom.insert(0, workout.clone());
        Ok(workout)
    }

    /// Delete a custom workout.
    ///
    /// # Errors
    ///
    /// Generated workouts are immutable. Store failures are returned and the
    /// workout stays listed. A workout the store no longer has is dropped
    /// from the list.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.generated.iter().any(|w| w.id == id) {
            return Err(CoreError::ImmutableWorkout(id.to_string()));
        }
        let pos = self
            .custom
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| CoreError::WorkoutNotFound(id.to_string()))?;
        let store = self.store.as_ref().ok_or(StoreError::NoIdentity)?;

        match store.delete_custom_workout(id) {
            Ok(()) => tracing::info!(id, "custom workout deleted"),
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(id, "custom workout already gone from store")
            }
            Err(e) => return Err(e.into()),
        }
        self.custom.remove(pos);
        Ok(())
    }

    pub fn is_local(&self) -> bool {
        self.store.is_none()
    }
}
