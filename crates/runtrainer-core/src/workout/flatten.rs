//! Loop expansion.
//!
//! A run never executes the authored structure directly; it executes the
//! flat queue produced here. The queue is rebuilt from the workout for every
//! run and is not mutated afterwards.

use serde::Serialize;

use super::schema::{WorkoutNode, WorkoutStep, WorkoutStructure};
use crate::error::ValidationError;

/// Flat, loop-free sequence of steps in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionQueue {
    steps: Vec<WorkoutStep>,
}

impl ExecutionQueue {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WorkoutStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[WorkoutStep] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutStep> {
        self.steps.iter()
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.duration_secs)).sum()
    }

    /// Seconds in all steps before `index`.
    pub fn elapsed_before(&self, index: usize) -> u64 {
        self.steps
            .iter()
            .take(index)
            .map(|s| u64::from(s.duration_secs))
            .sum()
    }

    /// Reject a queue with nothing to run.
    pub fn ensure_runnable(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyQueue);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ExecutionQueue {
    type Item = &'a WorkoutStep;
    type IntoIter = std::slice::Iter<'a, WorkoutStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Expand every loop into `cycles` copies of its items, keeping order.
///
/// Never fails: a loop with zero cycles or no items contributes nothing.
pub fn flatten(structure: &WorkoutStructure) -> ExecutionQueue {
    let mut steps = Vec::with_capacity(structure.expanded_len());
    for node in structure.nodes() {
        match node {
            WorkoutNode::Step(step) => steps.push(step.clone()),
            WorkoutNode::Loop(lp) => {
                for _ in 0..lp.cycles {
                    steps.extend(lp.items.iter().cloned());
                }
            }
        }
    }
    ExecutionQueue { steps }
}
