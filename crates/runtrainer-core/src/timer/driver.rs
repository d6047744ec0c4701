//! Real-time driver on tokio.
//!
//! One task owns the controller. Wakeups are delivered by a sleeping
//! sub-task per scheduled tick that is aborted on cancel; user commands
//! arrive over a channel. Both feed the same `select!`, so ticks and
//! commands are applied strictly one after another.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::controller::{RunController, TickScheduler};
use super::engine::{RunPhase, TickToken, Wakeup, WorkoutRunner};
use crate::cue::Announcer;
use crate::events::Event;

/// Scheduler backed by `tokio::time::sleep`.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TickToken>,
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(ticks: mpsc::UnboundedSender<TickToken>) -> Self {
        Self { ticks, task: None }
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, wakeup: Wakeup) {
        self.cancel();
        let ticks = self.ticks.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(wakeup.after).await;
            let _ = ticks.send(wakeup.token);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug)]
pub enum RunCommand {
    TogglePause,
    Skip,
    Abandon,
    Snapshot(oneshot::Sender<Event>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { workout_id: String },
    Abandoned { workout_id: String },
}

/// Handle to a run executing on the tokio runtime.
pub struct RunHandle {
    commands: mpsc::UnboundedSender<RunCommand>,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub fn toggle_pause(&self) {
        let _ = self.commands.send(RunCommand::TogglePause);
    }

    pub fn skip(&self) {
        let _ = self.commands.send(RunCommand::Skip);
    }

    pub fn abandon(&self) {
        let _ = self.commands.send(RunCommand::Abandon);
    }

    /// Current state, or `None` once the run has ended.
    pub async fn snapshot(&self) -> Option<Event> {
        let (tx, rx) = oneshot::channel();
        self.commands.send(RunCommand::Snapshot(tx)).ok()?;
        rx.await.ok()
    }

    pub fn commands(&self) -> mpsc::UnboundedSender<RunCommand> {
        self.commands.clone()
    }

    /// Wait for the run to end. A panicked or cancelled task counts as
    /// abandoned.
    pub async fn finished(self, workout_id: &str) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%err, "run task ended abnormally");
                RunOutcome::Abandoned {
                    workout_id: workout_id.to_string(),
                }
            }
        }
    }
}

/// Start `runner` on the current tokio runtime. Every event is forwarded on
/// `events`; the caller routes `WorkoutFinished` to the progress ledger.
pub fn spawn_run(
    runner: WorkoutRunner,
    announcer: Box<dyn Announcer>,
    events: mpsc::UnboundedSender<Event>,
) -> RunHandle {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(drive(runner, announcer, commands_rx, events));
    RunHandle {
        commands: commands_tx,
        task,
    }
}

async fn drive(
    runner: WorkoutRunner,
    announcer: Box<dyn Announcer>,
    mut commands: mpsc::UnboundedReceiver<RunCommand>,
    events: mpsc::UnboundedSender<Event>,
) -> RunOutcome {
    let workout_id = runner.workout_id().to_string();
    let (ticks_tx, mut ticks_rx) = mpsc::unbounded_channel();
    let mut controller = RunController::new(runner, TokioScheduler::new(ticks_tx), announcer);

    forward(&events, controller.start());

    loop {
        let produced = tokio::select! {
            biased;
            cmd = commands.recv() => match cmd {
                Some(RunCommand::TogglePause) => controller.toggle_pause(),
                Some(RunCommand::Skip) => controller.skip(),
                Some(RunCommand::Snapshot(reply)) => {
                    let _ = reply.send(controller.runner().snapshot());
                    Vec::new()
                }
                Some(RunCommand::Abandon) | None => controller.abandon(),
            },
            Some(token) = ticks_rx.recv() => controller.on_wakeup(token),
        };
        forward(&events, produced);

        match controller.phase() {
            RunPhase::Complete => return RunOutcome::Completed { workout_id },
            RunPhase::Idle => return RunOutcome::Abandoned { workout_id },
            _ => {}
        }
    }
}

fn forward(events: &mpsc::UnboundedSender<Event>, produced: Vec<Event>) {
    for event in produced {
        // Receiver gone means nobody is watching; the run still proceeds.
        let _ = events.send(event);
    }
}
