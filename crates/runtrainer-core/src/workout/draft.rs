//! Custom workout authoring.
//!
//! A draft collects steps entered as minutes + seconds and loops, then is
//! handed to [`Catalog::create`](crate::catalog::Catalog::create).

use serde::{Deserialize, Serialize};

use super::schema::{StepKind, WorkoutLoop, WorkoutStep, WorkoutStructure};
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub structure: WorkoutStructure,
}

impl WorkoutDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            structure: WorkoutStructure::default(),
        }
    }

    /// Append a step of `kind` lasting `minutes:seconds`.
    ///
    /// # Errors
    /// Returns `InvalidDuration` if the total is zero; the draft is unchanged.
    pub fn add_step(
        &mut self,
        kind: StepKind,
        minutes: u32,
        seconds: u32,
    ) -> Result<&mut Self, ValidationError> {
        let total = minutes.saturating_mul(60).saturating_add(seconds);
        if total == 0 {
            return Err(ValidationError::InvalidDuration {
                name: kind.label().to_string(),
            });
        }
        self.structure.push_step(WorkoutStep::of_kind(kind, total));
        Ok(self)
    }

    /// Append a loop of already-built steps.
    ///
    /// # Errors
    /// Rejects zero cycles, an empty item list, or a zero-length item.
    pub fn add_loop(
        &mut self,
        cycles: u32,
        items: Vec<WorkoutStep>,
    ) -> Result<&mut Self, ValidationError> {
        if cycles == 0 {
            return Err(ValidationError::InvalidCycles);
        }
        if items.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "loop".into(),
                message: "loop needs at least one step".into(),
            });
        }
        if let Some(step) = items.iter().find(|s| s.duration_secs == 0) {
            return Err(ValidationError::InvalidDuration {
                name: step.name.clone(),
            });
        }
        self.structure.push_loop(WorkoutLoop::new(cycles, items));
        Ok(self)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
