mod draft;
mod flatten;
mod schema;

pub use draft::WorkoutDraft;
pub use flatten::{flatten, ExecutionQueue};
pub use schema::{
    format_clock, Category, StepKind, Workout, WorkoutLoop, WorkoutNode, WorkoutStep,
    WorkoutStructure,
};
