use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::timer::RunPhase;

/// Every transition of a run produces one or more events.
/// The driver routes cues to the announcer and completions to the ledger;
/// the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CountdownStarted {
        workout_id: String,
        from: u8,
        at: DateTime<Utc>,
    },
    CountdownTick {
        value: u8,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the "go" hold is in progress.
    CountdownGo {
        at: DateTime<Utc>,
    },
    /// Announcement requested.
    CueEmitted {
        cue: Cue,
        at: DateTime<Utc>,
    },
    StepStarted {
        step_index: usize,
        step_name: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    RunPaused {
        step_index: usize,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    RunResumed {
        step_index: usize,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StepSkipped {
        from_step: usize,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Emitted exactly once per completed run.
    WorkoutFinished {
        workout_id: String,
        at: DateTime<Utc>,
    },
    RunAbandoned {
        workout_id: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: RunPhase,
        workout_id: String,
        step_index: Option<usize>,
        step_name: Option<String>,
        next_step_name: Option<String>,
        remaining_secs: u32,
        elapsed_secs: u64,
        total_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::CueEmitted { cue, .. } => Some(*cue),
            _ => None,
        }
    }

    pub fn finished_workout(&self) -> Option<&str> {
        match self {
            Event::WorkoutFinished { workout_id, .. } => Some(workout_id),
            _ => None,
        }
    }
}
