//! Workout runner state machine.
//!
//! The runner is pure: it never sleeps and never talks to audio or storage.
//! Every command returns the [`Event`]s it produced, and the next timed
//! transition is exposed as a [`Wakeup`] that the caller must deliver back
//! through [`WorkoutRunner::fire`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Countdown(3) -> Countdown(2) -> Countdown(1) -> Countdown(0) "go"
//!      -> Running <-> Paused
//!      -> Complete
//! any  -> Idle (abandon)
//! ```
//!
//! Each scheduled wakeup carries a generation token. Pausing, skipping,
//! abandoning or completing bumps the generation, so a wakeup that was
//! already in flight is ignored instead of advancing the wrong step.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cue::{classify, Cue};
use crate::error::ValidationError;
use crate::events::Event;
use crate::workout::{flatten, ExecutionQueue, Workout, WorkoutStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    /// Pre-roll. `0` is the "go" hold before the first step.
    Countdown(u8),
    Running,
    Paused,
    Complete,
}

/// Countdown value at which the pre-start cue plays. Shorter countdowns
/// play it as soon as they start.
const PRE_START_AT: u8 = 3;

/// Generation of a scheduled wakeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeupKind {
    CountdownTick,
    GoHold,
    Tick,
}

/// A timed transition the caller must deliver after `after` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wakeup {
    pub token: TickToken,
    pub kind: WakeupKind,
    pub after: Duration,
}

/// Delays used by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerTiming {
    pub countdown_from: u8,
    pub tick: Duration,
    pub go_hold: Duration,
}

impl Default for RunnerTiming {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            tick: Duration::from_secs(1),
            go_hold: Duration::from_millis(1500),
        }
    }
}

impl RunnerTiming {
    fn delay(&self, kind: WakeupKind) -> Duration {
        match kind {
            WakeupKind::CountdownTick | WakeupKind::Tick => self.tick,
            WakeupKind::GoHold => self.go_hold,
        }
    }
}

/// State of the workout currently being executed.
#[derive(Debug, Clone)]
pub struct WorkoutRunner {
    workout_id: String,
    queue: ExecutionQueue,
    timing: RunnerTiming,
    phase: RunPhase,
    current_index: Option<usize>,
    remaining_secs: u32,
    generation: u64,
    pending: Option<Wakeup>,
    finished: bool,
}

impl WorkoutRunner {
    /// Build a runner for `workout`. The queue is flattened here and never
    /// changes for the lifetime of the runner.
    ///
    /// # Errors
    /// Returns `EmptyQueue` if the structure expands to no steps.
    pub fn new(workout: &Workout, timing: RunnerTiming) -> Result<Self, ValidationError> {
        let queue = flatten(&workout.structure);
        queue.ensure_runnable()?;
        Ok(Self {
            workout_id: workout.id.clone(),
            queue,
            timing,
            phase: RunPhase::Idle,
            current_index: None,
            remaining_secs: 0,
            generation: 0,
            pending: None,
            finished: false,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub fn queue(&self) -> &ExecutionQueue {
        &self.queue
    }

    pub fn timing(&self) -> &RunnerTiming {
        &self.timing
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_step(&self) -> Option<&WorkoutStep> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    /// Step shown as "up next"; `None` on the last step.
    pub fn next_step(&self) -> Option<&WorkoutStep> {
        match self.current_index {
            Some(i) => self.queue.get(i + 1),
            None => self.queue.get(0),
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RunPhase::Complete
    }

    pub fn pending_wakeup(&self) -> Option<Wakeup> {
        self.pending
    }

    pub fn total_secs(&self) -> u64 {
        self.queue.total_duration_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        if self.phase == RunPhase::Complete {
            return self.total_secs();
        }
        match self.current_step() {
            Some(step) => {
                let index = self.current_index.unwrap_or(0);
                self.queue.elapsed_before(index)
                    + u64::from(step.duration_secs.saturating_sub(self.remaining_secs))
            }
            None => 0,
        }
    }

    /// 0.0 .. 100.0 progress across the whole queue.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (self.elapsed_secs() as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            workout_id: self.workout_id.clone(),
            step_index: self.current_index,
            step_name: self.current_step().map(|s| s.name.clone()),
            next_step_name: self.next_step().map(|s| s.name.clone()),
            remaining_secs: self.remaining_secs,
            elapsed_secs: self.elapsed_secs(),
            total_secs: self.total_secs(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the pre-roll countdown. Only valid from `Idle`; a runner that
    /// has completed stays complete.
    pub fn start(&mut self) -> Vec<Event> {
        if self.phase != RunPhase::Idle || self.finished {
            return Vec::new();
        }
        let from = self.timing.countdown_from;
        self.current_index = None;
        self.remaining_secs = 0;
        self.phase = RunPhase::Countdown(from);
        tracing::info!(workout_id = %self.workout_id, steps = self.queue.len(), "run started");

        let now = Utc::now();
        let mut events = vec![Event::CountdownStarted {
            workout_id: self.workout_id.clone(),
            from,
            at: now,
        }];
        if from <= PRE_START_AT {
            events.push(Event::CueEmitted {
                cue: Cue::PreStart,
                at: now,
            });
        }
        if from == 0 {
            events.push(Event::CountdownGo { at: now });
            self.schedule(WakeupKind::GoHold);
        } else {
            self.schedule(WakeupKind::CountdownTick);
        }
        events
    }

    /// Deliver a scheduled wakeup. Tokens from a superseded generation are
    /// ignored.
    pub fn fire(&mut self, token: TickToken) -> Vec<Event> {
        let wakeup = match self.pending {
            Some(w) if w.token == token => w,
            _ => {
                tracing::debug!(?token, "stale wakeup ignored");
                return Vec::new();
            }
        };
        self.pending = None;

        match (wakeup.kind, self.phase) {
            (WakeupKind::CountdownTick, RunPhase::Countdown(n)) if n > 0 => {
                let value = n - 1;
                self.phase = RunPhase::Countdown(value);
                let now = Utc::now();
                let mut events = vec![Event::CountdownTick { value, at: now }];
                if value == PRE_START_AT {
                    events.push(Event::CueEmitted {
                        cue: Cue::PreStart,
                        at: now,
                    });
                }
                if value == 0 {
                    events.push(Event::CountdownGo { at: now });
                    self.schedule(WakeupKind::GoHold);
                } else {
                    self.schedule(WakeupKind::CountdownTick);
                }
                events
            }
            (WakeupKind::GoHold, RunPhase::Countdown(0)) => {
                self.phase = RunPhase::Running;
                self.enter_from(0)
            }
            (WakeupKind::Tick, RunPhase::Running) => self.tick(),
            (kind, phase) => {
                tracing::debug!(?kind, ?phase, "wakeup does not apply to current phase");
                Vec::new()
            }
        }
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) -> Vec<Event> {
        match self.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            _ => Vec::new(),
        }
    }

    pub fn pause(&mut self) -> Vec<Event> {
        if self.phase != RunPhase::Running {
            return Vec::new();
        }
        self.cancel_pending();
        self.phase = RunPhase::Paused;
        vec![Event::RunPaused {
            step_index: self.current_index.unwrap_or(0),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }]
    }

    pub fn resume(&mut self) -> Vec<Event> {
        if self.phase != RunPhase::Paused {
            return Vec::new();
        }
        self.phase = RunPhase::Running;
        self.schedule(WakeupKind::Tick);
        vec![Event::RunResumed {
            step_index: self.current_index.unwrap_or(0),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }]
    }

    /// Force the step-advance transition now, from `Running` or `Paused`.
    /// On the last step this completes the run.
    pub fn skip(&mut self) -> Vec<Event> {
        if !matches!(self.phase, RunPhase::Running | RunPhase::Paused) {
            return Vec::new();
        }
        if self.remaining_secs == 0 {
            // A tick already drove this step to zero and owns the transition.
            return Vec::new();
        }
        let from_step = self.current_index.unwrap_or(0);
        self.cancel_pending();
        self.phase = RunPhase::Running;
        let mut events = vec![Event::StepSkipped {
            from_step,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }];
        events.extend(self.enter_from(from_step + 1));
        events
    }

    /// Drop the run without recording a completion. No-op once complete.
    pub fn abandon(&mut self) -> Vec<Event> {
        if self.phase == RunPhase::Complete {
            return Vec::new();
        }
        let was = self.phase;
        self.cancel_pending();
        self.phase = RunPhase::Idle;
        self.current_index = None;
        self.remaining_secs = 0;
        match was {
            RunPhase::Idle => Vec::new(),
            _ => {
                tracing::info!(workout_id = %self.workout_id, "run abandoned");
                vec![Event::RunAbandoned {
                    workout_id: self.workout_id.clone(),
                    at: Utc::now(),
                }]
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn tick(&mut self) -> Vec<Event> {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            self.schedule(WakeupKind::Tick);
            return Vec::new();
        }
        let next = self.current_index.map(|i| i + 1).unwrap_or(0);
        self.enter_from(next)
    }

    /// Enter the first step at or after `index` that has a duration, or
    /// complete the run if there is none.
    fn enter_from(&mut self, index: usize) -> Vec<Event> {
        let mut index = index;
        while let Some(step) = self.queue.get(index) {
            if step.duration_secs > 0 {
                break;
            }
            tracing::debug!(step_index = index, "zero-length step passed over");
            index += 1;
        }

        let Some(step) = self.queue.get(index) else {
            return self.complete();
        };
        let now = Utc::now();
        let mut events = vec![Event::StepStarted {
            step_index: index,
            step_name: step.name.clone(),
            duration_secs: step.duration_secs,
            at: now,
        }];
        if let Some(cue) = classify(&step.name).cue() {
            events.push(Event::CueEmitted { cue, at: now });
        }
        tracing::debug!(step_index = index, step = %step.name, secs = step.duration_secs, "step started");
        self.current_index = Some(index);
        self.remaining_secs = step.duration_secs;
        self.schedule(WakeupKind::Tick);
        events
    }

    fn complete(&mut self) -> Vec<Event> {
        self.cancel_pending();
        self.phase = RunPhase::Complete;
        self.remaining_secs = 0;
        if self.finished {
            return Vec::new();
        }
        self.finished = true;
        tracing::info!(workout_id = %self.workout_id, "run complete");
        let now = Utc::now();
        vec![
            Event::CueEmitted {
                cue: Cue::Finish,
                at: now,
            },
            Event::WorkoutFinished {
                workout_id: self.workout_id.clone(),
                at: now,
            },
        ]
    }

    fn schedule(&mut self, kind: WakeupKind) {
        self.generation += 1;
        self.pending = Some(Wakeup {
            token: TickToken(self.generation),
            kind,
            after: self.timing.delay(kind),
        });
    }

    fn cancel_pending(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Category, WorkoutLoop, WorkoutNode, WorkoutStep, WorkoutStructure};

    fn workout(nodes: Vec<WorkoutNode>) -> Workout {
        Workout {
            id: "w1".into(),
            category: Category::Custom,
            title: "Test".into(),
            description: String::new(),
            structure: WorkoutStructure::new(nodes),
            created_at: None,
        }
    }

    fn step(name: &str, secs: u32) -> WorkoutNode {
        WorkoutNode::Step(WorkoutStep::new(name, secs, ""))
    }

    /// Fire whatever is pending, collecting events.
    fn fire_pending(runner: &mut WorkoutRunner) -> Vec<Event> {
        let w = runner.pending_wakeup().expect("pending wakeup");
        runner.fire(w.token)
    }

    fn run_countdown(runner: &mut WorkoutRunner) -> Vec<Event> {
        let mut events = runner.start();
        while matches!(runner.phase(), RunPhase::Countdown(_)) {
            events.extend(fire_pending(runner));
        }
        events
    }

    fn cues(events: &[Event]) -> Vec<Cue> {
        events.iter().filter_map(Event::cue).collect()
    }

    #[test]
    fn empty_workout_is_rejected() {
        let err = WorkoutRunner::new(&workout(vec![]), RunnerTiming::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyQueue);

        let only_empty_loop = workout(vec![WorkoutNode::Loop(WorkoutLoop::new(0, vec![]))]);
        assert!(WorkoutRunner::new(&only_empty_loop, RunnerTiming::default()).is_err());
    }

    #[test]
    fn countdown_sequence_then_running() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Aquecer", 5)]), RunnerTiming::default())
                .unwrap();
        assert_eq!(runner.phase(), RunPhase::Idle);

        let events = runner.start();
        assert_eq!(runner.phase(), RunPhase::Countdown(3));
        assert_eq!(cues(&events), [Cue::PreStart]);
        assert_eq!(runner.pending_wakeup().unwrap().after, Duration::from_secs(1));

        fire_pending(&mut runner);
        assert_eq!(runner.phase(), RunPhase::Countdown(2));
        fire_pending(&mut runner);
        assert_eq!(runner.phase(), RunPhase::Countdown(1));
        let events = fire_pending(&mut runner);
        assert_eq!(runner.phase(), RunPhase::Countdown(0));
        assert!(events.iter().any(|e| matches!(e, Event::CountdownGo { .. })));
        let hold = runner.pending_wakeup().unwrap();
        assert_eq!(hold.kind, WakeupKind::GoHold);
        assert_eq!(hold.after, Duration::from_millis(1500));

        let events = fire_pending(&mut runner);
        assert_eq!(runner.phase(), RunPhase::Running);
        assert_eq!(runner.current_index(), Some(0));
        assert_eq!(runner.remaining_secs(), 5);
        assert_eq!(cues(&events), [Cue::Warmup]);
    }

    #[test]
    fn pre_start_cue_emitted_once() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 2)]), RunnerTiming::default())
                .unwrap();
        let events = run_countdown(&mut runner);
        let pre = cues(&events).into_iter().filter(|c| *c == Cue::PreStart).count();
        assert_eq!(pre, 1);
        assert!(runner.start().is_empty());
    }

    #[test]
    fn pre_start_cue_waits_for_three_on_longer_countdowns() {
        let timing = RunnerTiming {
            countdown_from: 5,
            ..RunnerTiming::default()
        };
        let mut runner = WorkoutRunner::new(&workout(vec![step("Correr", 2)]), timing).unwrap();
        assert!(cues(&runner.start()).is_empty());
        assert!(cues(&fire_pending(&mut runner)).is_empty());
        assert_eq!(runner.phase(), RunPhase::Countdown(4));

        let events = fire_pending(&mut runner);
        assert_eq!(runner.phase(), RunPhase::Countdown(3));
        assert_eq!(cues(&events), [Cue::PreStart]);

        let mut rest = Vec::new();
        while matches!(runner.phase(), RunPhase::Countdown(_)) {
            rest.extend(fire_pending(&mut runner));
        }
        assert!(!cues(&rest).contains(&Cue::PreStart));
    }

    #[test]
    fn pre_start_cue_on_short_countdown() {
        for from in [0, 1, 2] {
            let timing = RunnerTiming {
                countdown_from: from,
                ..RunnerTiming::default()
            };
            let mut runner =
                WorkoutRunner::new(&workout(vec![step("Correr", 2)]), timing).unwrap();
            let events = run_countdown(&mut runner);
            let pre = cues(&events).into_iter().filter(|c| *c == Cue::PreStart).count();
            assert_eq!(pre, 1, "countdown from {from}");
        }
    }

    #[test]
    fn tick_decrements_and_advances() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 2), step("Andar", 3)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);

        assert!(fire_pending(&mut runner).is_empty());
        assert_eq!(runner.remaining_secs(), 1);

        let events = fire_pending(&mut runner);
        assert_eq!(runner.current_index(), Some(1));
        assert_eq!(runner.remaining_secs(), 3);
        assert_eq!(cues(&events), [Cue::Walk]);
    }

    #[test]
    fn completes_exactly_once() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 1)]), RunnerTiming::default())
                .unwrap();
        run_countdown(&mut runner);
        let events = fire_pending(&mut runner);
        assert!(runner.is_complete());
        assert_eq!(cues(&events), [Cue::Finish]);
        assert_eq!(events.iter().filter(|e| e.finished_workout().is_some()).count(), 1);
        assert!(runner.pending_wakeup().is_none());
        assert!(runner.skip().is_empty());
        assert!(runner.toggle_pause().is_empty());
    }

    #[test]
    fn pause_preserves_remaining_and_cancels_tick() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 10)]), RunnerTiming::default())
                .unwrap();
        run_countdown(&mut runner);
        fire_pending(&mut runner);
        let stale = runner.pending_wakeup().unwrap().token;

        runner.toggle_pause();
        assert_eq!(runner.phase(), RunPhase::Paused);
        assert!(runner.pending_wakeup().is_none());
        assert!(runner.fire(stale).is_empty());
        assert_eq!(runner.remaining_secs(), 9);

        runner.toggle_pause();
        assert_eq!(runner.phase(), RunPhase::Running);
        assert_eq!(runner.remaining_secs(), 9);
        assert!(runner.fire(stale).is_empty());
        fire_pending(&mut runner);
        assert_eq!(runner.remaining_secs(), 8);
    }

    #[test]
    fn skip_moves_to_next_step_and_restarts_tick() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 10), step("Andar", 20)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);
        let stale = runner.pending_wakeup().unwrap().token;

        let events = runner.skip();
        assert_eq!(runner.current_index(), Some(1));
        assert_eq!(runner.remaining_secs(), 20);
        assert_eq!(cues(&events), [Cue::Walk]);
        assert!(runner.fire(stale).is_empty());
        assert_eq!(runner.remaining_secs(), 20);
    }

    #[test]
    fn skip_from_pause_resumes() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 10), step("Andar", 20)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);
        runner.pause();
        runner.skip();
        assert_eq!(runner.phase(), RunPhase::Running);
        assert_eq!(runner.current_index(), Some(1));
        assert!(runner.pending_wakeup().is_some());
    }

    #[test]
    fn skip_on_last_step_completes() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 10), step("Resfriar", 20)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);
        runner.skip();
        assert_eq!(runner.current_index(), Some(1));

        let events = runner.skip();
        assert!(runner.is_complete());
        assert_eq!(cues(&events), [Cue::Finish]);
        assert_eq!(
            events.iter().filter_map(Event::finished_workout).collect::<Vec<_>>(),
            ["w1"]
        );
        assert!(runner.skip().is_empty());
    }

    #[test]
    fn skip_ignored_during_countdown() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 10)]), RunnerTiming::default())
                .unwrap();
        runner.start();
        assert!(runner.skip().is_empty());
        assert_eq!(runner.phase(), RunPhase::Countdown(3));
    }

    #[test]
    fn abandon_discards_without_completion() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 10)]), RunnerTiming::default())
                .unwrap();
        run_countdown(&mut runner);
        let stale = runner.pending_wakeup().unwrap().token;
        let events = runner.abandon();
        assert!(matches!(events[..], [Event::RunAbandoned { .. }]));
        assert_eq!(runner.phase(), RunPhase::Idle);
        assert!(runner.pending_wakeup().is_none());
        assert!(runner.fire(stale).is_empty());
        assert_eq!(runner.phase(), RunPhase::Idle);
    }

    #[test]
    fn complete_is_terminal() {
        let mut runner =
            WorkoutRunner::new(&workout(vec![step("Correr", 1)]), RunnerTiming::default())
                .unwrap();
        let mut events = run_countdown(&mut runner);
        events.extend(fire_pending(&mut runner));
        assert!(runner.is_complete());

        assert!(runner.abandon().is_empty());
        assert!(runner.is_complete());
        assert!(runner.start().is_empty());
        assert!(runner.pending_wakeup().is_none());
        assert_eq!(events.iter().filter(|e| e.finished_workout().is_some()).count(), 1);
    }

    #[test]
    fn abandon_during_go_hold_cancels_start() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 10)]),
            RunnerTiming {
                countdown_from: 0,
                ..RunnerTiming::default()
            },
        )
        .unwrap();
        runner.start();
        let hold = runner.pending_wakeup().unwrap();
        assert_eq!(hold.kind, WakeupKind::GoHold);
        runner.abandon();
        assert!(runner.fire(hold.token).is_empty());
        assert_eq!(runner.current_index(), None);
    }

    #[test]
    fn zero_length_steps_are_passed_over() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Aquecer", 0), step("Correr", 2), step("Andar", 0)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);
        assert_eq!(runner.current_index(), Some(1));
        fire_pending(&mut runner);
        let events = fire_pending(&mut runner);
        assert!(runner.is_complete());
        assert_eq!(cues(&events), [Cue::Finish]);
    }

    #[test]
    fn progress_tracks_elapsed() {
        let mut runner = WorkoutRunner::new(
            &workout(vec![step("Correr", 10), step("Andar", 10)]),
            RunnerTiming::default(),
        )
        .unwrap();
        run_countdown(&mut runner);
        for _ in 0..15 {
            fire_pending(&mut runner);
        }
        assert_eq!(runner.elapsed_secs(), 15);
        assert!((runner.progress_pct() - 75.0).abs() < f64::EPSILON);
        match runner.snapshot() {
            Event::StateSnapshot {
                step_name,
                next_step_name,
                remaining_secs,
                ..
            } => {
                assert_eq!(step_name.as_deref(), Some("Andar"));
                assert_eq!(next_step_name, None);
                assert_eq!(remaining_secs, 5);
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }
}
