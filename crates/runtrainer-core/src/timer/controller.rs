//! Glue between the pure runner, a tick source, and the announcer.
//!
//! The controller forwards cue events to the [`Announcer`] and keeps the
//! [`TickScheduler`] in step with the runner's pending wakeup: whenever the
//! runner replaces or drops its wakeup, the old one is cancelled before the
//! new one is scheduled.

use super::engine::{RunPhase, TickToken, Wakeup, WorkoutRunner};
use crate::cue::Announcer;
use crate::events::Event;

/// A source of delayed wakeups with explicit cancel.
pub trait TickScheduler: Send {
    /// Deliver `wakeup.token` after `wakeup.after`. Replaces any pending one.
    fn schedule(&mut self, wakeup: Wakeup);
    fn cancel(&mut self);
}

/// Scheduler driven by hand. Tests fire the pending wakeup explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<Wakeup>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Wakeup> {
        self.pending
    }

    /// Remove and return the pending wakeup, as if its delay elapsed.
    pub fn take(&mut self) -> Option<Wakeup> {
        self.pending.take()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, wakeup: Wakeup) {
        self.pending = Some(wakeup);
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.cancelled += 1;
        }
    }
}

pub struct RunController<S: TickScheduler> {
    runner: WorkoutRunner,
    scheduler: S,
    announcer: Box<dyn Announcer>,
    scheduled: Option<TickToken>,
}

impl<S: TickScheduler> RunController<S> {
    pub fn new(runner: WorkoutRunner, scheduler: S, announcer: Box<dyn Announcer>) -> Self {
        Self {
            runner,
            scheduler,
            announcer,
            scheduled: None,
        }
    }

    pub fn runner(&self) -> &WorkoutRunner {
        &self.runner
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn phase(&self) -> RunPhase {
        self.runner.phase()
    }

    pub fn start(&mut self) -> Vec<Event> {
        let events = self.runner.start();
        self.dispatch(events)
    }

    pub fn on_wakeup(&mut self, token: TickToken) -> Vec<Event> {
        if self.scheduled == Some(token) {
            self.scheduled = None;
        }
        let events = self.runner.fire(token);
        self.dispatch(events)
    }

    pub fn toggle_pause(&mut self) -> Vec<Event> {
        let events = self.runner.toggle_pause();
        self.dispatch(events)
    }

    pub fn skip(&mut self) -> Vec<Event> {
        let events = self.runner.skip();
        self.dispatch(events)
    }

    pub fn abandon(&mut self) -> Vec<Event> {
        let events = self.runner.abandon();
        self.dispatch(events)
    }

    fn dispatch(&mut self, events: Vec<Event>) -> Vec<Event> {
        for cue in events.iter().filter_map(Event::cue) {
            self.announcer.announce(cue);
        }
        self.sync_scheduler();
        events
    }

    fn sync_scheduler(&mut self) {
        match self.runner.pending_wakeup() {
            Some(wakeup) if self.scheduled != Some(wakeup.token) => {
                self.scheduler.cancel();
                self.scheduler.schedule(wakeup);
                self.scheduled = Some(wakeup.token);
            }
            None if self.scheduled.is_some() => {
                self.scheduler.cancel();
                self.scheduled = None;
            }
            _ => {}
        }
    }
}

impl<S: TickScheduler> Drop for RunController<S> {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}
