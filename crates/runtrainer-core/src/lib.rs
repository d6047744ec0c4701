//! # Runtrainer Core Library
//!
//! Core logic for the runtrainer interval timer and run-training planner.
//! The CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Workout schema**: steps and repeated loops, flattened into a linear
//!   execution queue before a run
//! - **Timer engine**: a pure state machine (countdown, running, paused,
//!   complete) that asks its caller for delayed wakeups instead of owning a
//!   clock, plus a tokio driver that delivers them
//! - **Cues**: step names classified into announcement categories and played
//!   through a superseding announcer
//! - **Storage**: per-identity document store (SQLite or in-memory) and
//!   TOML configuration
//!
//! ## Key Components
//!
//! - [`WorkoutRunner`]: execution state machine
//! - [`Session`]: configuration, identity, catalog and progress for one user
//! - [`Catalog`]: generated plans plus custom workouts
//! - [`ProgressLedger`]: completed workout ids
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod cue;
pub mod error;
pub mod events;
pub mod identity;
pub mod plans;
pub mod progress;
pub mod session;
pub mod storage;
pub mod timer;
pub mod workout;

pub use catalog::Catalog;
pub use cue::{classify, Announcer, Cue, CueCategory, ExclusiveAnnouncer};
pub use error::{ConfigError, CoreError, IdentityError, StoreError, ValidationError};
pub use events::Event;
pub use identity::Identity;
pub use progress::ProgressLedger;
pub use session::Session;
pub use storage::{Config, MemoryStore, ScopedStore, SqliteStore, WorkoutStore};
pub use timer::{RunController, RunPhase, RunnerTiming, TickScheduler, WorkoutRunner};
pub use workout::{
    flatten, Category, ExecutionQueue, StepKind, Workout, WorkoutDraft, WorkoutLoop, WorkoutNode,
    WorkoutStep, WorkoutStructure,
};
