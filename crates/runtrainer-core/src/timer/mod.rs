mod controller;
mod driver;
mod engine;

pub use controller::{ManualScheduler, RunController, TickScheduler};
pub use driver::{spawn_run, RunCommand, RunHandle, RunOutcome, TokioScheduler};
pub use engine::{RunPhase, RunnerTiming, TickToken, Wakeup, WakeupKind, WorkoutRunner};
