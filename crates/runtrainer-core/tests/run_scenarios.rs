//! End-to-end runs driven by simulated ticks.

use std::sync::Arc;

use runtrainer_core::cue::{Cue, CueRecorder};
use runtrainer_core::timer::{ManualScheduler, WakeupKind};
use runtrainer_core::{
    Category, Config, CoreError, Event, Identity, MemoryStore, RunController, RunPhase,
    RunnerTiming, Session, ValidationError, Workout, WorkoutLoop, WorkoutNode, WorkoutRunner,
    WorkoutStep, WorkoutStructure,
};

fn interval_workout() -> Workout {
    Workout {
        id: "intervals".into(),
        category: Category::Custom,
        title: "Intervalado".into(),
        description: String::new(),
        structure: WorkoutStructure::new(vec![
            WorkoutNode::Step(WorkoutStep::new("Aquecer", 300, "#eab308")),
            WorkoutNode::Loop(WorkoutLoop::new(
                3,
                vec![
                    WorkoutStep::new("Correr", 60, "#ef4444"),
                    WorkoutStep::new("Andar", 90, "#3b82f6"),
                ],
            )),
            WorkoutNode::Step(WorkoutStep::new("Resfriar", 300, "#10b981")),
        ]),
        created_at: None,
    }
}

fn two_steps() -> Workout {
    Workout {
        id: "two".into(),
        category: Category::Custom,
        title: "Dois".into(),
        description: String::new(),
        structure: WorkoutStructure::new(vec![
            WorkoutNode::Step(WorkoutStep::new("Correr", 5, "")),
            WorkoutNode::Step(WorkoutStep::new("Caminhar", 5, "")),
        ]),
        created_at: None,
    }
}

struct Harness {
    controller: RunController<ManualScheduler>,
    recorder: CueRecorder,
    events: Vec<Event>,
    ticks: usize,
}

impl Harness {
    fn new(workout: &Workout) -> Self {
        let recorder = CueRecorder::new();
        let runner = WorkoutRunner::new(workout, RunnerTiming::default()).unwrap();
        let mut controller =
            RunController::new(runner, ManualScheduler::new(), Box::new(recorder.clone()));
        let events = controller.start();
        Self {
            controller,
            recorder,
            events,
            ticks: 0,
        }
    }

    /// Deliver the pending wakeup. Returns false if none is pending.
    fn step(&mut self) -> bool {
        let Some(wakeup) = self.controller.scheduler_mut().take() else {
            return false;
        };
        if wakeup.kind == WakeupKind::Tick {
            self.ticks += 1;
        }
        let produced = self.controller.on_wakeup(wakeup.token);
        self.events.extend(produced);
        true
    }

    /// Run the countdown and go hold.
    fn reach_running(&mut self) {
        while self.controller.phase() != RunPhase::Running {
            assert!(self.step(), "stalled in {:?}", self.controller.phase());
        }
    }

    fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.finished_workout().is_some())
            .count()
    }
}

#[test]
fn interval_workout_end_to_end() {
    let workout = interval_workout();
    let mut h = Harness::new(&workout);

    let queue = h.controller.runner().queue().clone();
    assert_eq!(queue.len(), 8);
    assert_eq!(queue.total_duration_secs(), 1050);

    while h.step() {}

    assert_eq!(h.controller.phase(), RunPhase::Complete);
    assert_eq!(h.ticks, 1050);
    assert_eq!(h.completions(), 1);
    assert_eq!(
        h.events.iter().find_map(Event::finished_workout),
        Some("intervals")
    );
    assert_eq!(
        h.recorder.cues(),
        [
            Cue::PreStart,
            Cue::Warmup,
            Cue::Run,
            Cue::Walk,
            Cue::Run,
            Cue::Walk,
            Cue::Run,
            Cue::Walk,
            Cue::Cooldown,
            Cue::Finish,
        ]
    );
}

#[test]
fn countdown_counts_down_before_first_step() {
    let mut h = Harness::new(&two_steps());
    assert_eq!(h.controller.phase(), RunPhase::Countdown(3));
    let mut seen = vec![];
    while h.controller.phase() != RunPhase::Running {
        seen.push(h.controller.phase());
        h.step();
    }
    assert_eq!(
        seen,
        [
            RunPhase::Countdown(3),
            RunPhase::Countdown(2),
            RunPhase::Countdown(1),
            RunPhase::Countdown(0),
        ]
    );
    assert_eq!(h.controller.runner().current_index(), Some(0));
    assert_eq!(h.controller.runner().remaining_secs(), 5);
    assert_eq!(h.recorder.count(Cue::PreStart), 1);
}

#[test]
fn pause_preserves_remaining_time() {
    let mut h = Harness::new(&two_steps());
    h.reach_running();
    h.step();
    h.step();
    assert_eq!(h.controller.runner().remaining_secs(), 3);

    h.controller.toggle_pause();
    assert_eq!(h.controller.phase(), RunPhase::Paused);
    // No wakeup is pending while paused, so nothing can elapse.
    assert!(!h.step());
    assert_eq!(h.controller.runner().remaining_secs(), 3);

    h.controller.toggle_pause();
    assert_eq!(h.controller.phase(), RunPhase::Running);
    assert_eq!(h.controller.runner().remaining_secs(), 3);
    h.step();
    assert_eq!(h.controller.runner().remaining_secs(), 2);
}

#[test]
fn skip_on_last_step_completes_once() {
    let mut h = Harness::new(&two_steps());
    h.reach_running();
    h.events.extend(h.controller.skip());
    assert_eq!(h.controller.runner().current_index(), Some(1));

    h.events.extend(h.controller.skip());
    assert_eq!(h.controller.phase(), RunPhase::Complete);
    assert_eq!(h.completions(), 1);
    assert_eq!(h.recorder.count(Cue::Finish), 1);

    // Nothing after completion can produce a second event.
    h.events.extend(h.controller.skip());
    h.events.extend(h.controller.toggle_pause());
    assert!(!h.step());
    assert_eq!(h.completions(), 1);
}

#[test]
fn skip_while_paused_resumes_on_next_step() {
    let mut h = Harness::new(&two_steps());
    h.reach_running();
    h.controller.toggle_pause();
    h.controller.skip();
    assert_eq!(h.controller.phase(), RunPhase::Running);
    assert_eq!(h.controller.runner().current_index(), Some(1));
    assert_eq!(h.controller.runner().remaining_secs(), 5);
    assert!(h.controller.scheduler().pending().is_some());
}

#[test]
fn stale_wakeup_is_inert() {
    let mut h = Harness::new(&two_steps());
    h.reach_running();
    let stale = h.controller.scheduler().pending().unwrap();

    h.controller.toggle_pause();
    h.controller.toggle_pause();
    let before = h.controller.runner().remaining_secs();
    assert!(h.controller.on_wakeup(stale.token).is_empty());
    assert_eq!(h.controller.runner().remaining_secs(), before);
}

#[test]
fn abandon_never_completes() {
    let mut h = Harness::new(&two_steps());
    h.reach_running();
    h.step();
    let events = h.controller.abandon();
    assert!(matches!(events.as_slice(), [Event::RunAbandoned { .. }]));
    assert_eq!(h.controller.phase(), RunPhase::Idle);
    assert!(!h.step());
    assert_eq!(h.completions(), 0);
}

#[test]
fn empty_structure_never_counts_down() {
    let mut workout = two_steps();
    workout.structure = WorkoutStructure::new(vec![WorkoutNode::Loop(WorkoutLoop::new(
        4,
        Vec::new(),
    ))]);
    assert_eq!(
        WorkoutRunner::new(&workout, RunnerTiming::default()).unwrap_err(),
        ValidationError::EmptyQueue
    );
}

#[test]
fn completion_reaches_ledger_once() {
    let mut session = Session::with_store(
        Config::default(),
        Arc::new(MemoryStore::new()),
        Identity::new("anon-run"),
    );
    let runner = session.start_run("c25k_w1_d1").unwrap();
    let mut controller = RunController::new(
        runner,
        ManualScheduler::new(),
        Box::new(CueRecorder::new()),
    );

    let mut recorded = 0;
    for event in controller.start() {
        recorded += usize::from(session.on_event(&event));
    }
    while let Some(wakeup) = controller.scheduler_mut().take() {
        for event in controller.on_wakeup(wakeup.token) {
            recorded += usize::from(session.on_event(&event));
        }
    }
    assert_eq!(recorded, 1);
    assert!(session.ledger().is_completed("c25k_w1_d1"));

    // Repeating a workout leaves the ledger unchanged.
    let runner = session.start_run("c25k_w1_d1").unwrap();
    let mut controller = RunController::new(
        runner,
        ManualScheduler::new(),
        Box::new(CueRecorder::new()),
    );
    controller.start();
    while controller.phase() != RunPhase::Complete {
        match controller.scheduler_mut().take() {
            Some(w) => {
                controller.on_wakeup(w.token);
            }
            None => {
                controller.skip();
            }
        }
    }
    let events = controller.skip();
    assert!(events.is_empty());
    assert_eq!(session.ledger().len(), 1);
}

#[test]
fn unknown_workout_cannot_start() {
    let session = Session::local(Config::default());
    assert!(matches!(
        session.start_run("custom-gone"),
        Err(CoreError::WorkoutNotFound(_))
    ));
}
