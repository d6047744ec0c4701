//! Audio cues.
//!
//! Steps carry no semantic kind at execution time, so the cue for a step is
//! inferred from its display name: a case-insensitive substring match against
//! keyword sets checked in a fixed order (warm-up, run, walk, cool-down).
//! The first set with a hit wins; no hit means no cue.
//!
//! Playback sits behind the [`Playback`] port. [`ExclusiveAnnouncer`] keeps at
//! most one cue active and stops the previous one before starting the next.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of classifying a step name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueCategory {
    Warmup,
    Run,
    Walk,
    Cooldown,
    None,
}

impl CueCategory {
    pub fn cue(self) -> Option<Cue> {
        match self {
            CueCategory::Warmup => Some(Cue::Warmup),
            CueCategory::Run => Some(Cue::Run),
            CueCategory::Walk => Some(Cue::Walk),
            CueCategory::Cooldown => Some(Cue::Cooldown),
            CueCategory::None => None,
        }
    }
}

/// Something the announcement sink can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    PreStart,
    Warmup,
    Run,
    Walk,
    Cooldown,
    Finish,
}

impl Cue {
    /// Bundled sound asset for this cue.
    pub fn asset(self) -> &'static str {
        match self {
            Cue::PreStart => "countdown.mp3",
            Cue::Warmup => "audio_warmup.mp3",
            Cue::Run => "audio_run.mp3",
            Cue::Walk => "audio_walk.mp3",
            Cue::Cooldown => "audio_cooldown.mp3",
            Cue::Finish => "audio_finished.mp3",
        }
    }

    /// Spoken fallback when no asset can be played.
    pub fn phrase(self) -> &'static str {
        match self {
            Cue::PreStart => "Prepare-se",
            Cue::Warmup => "Aquecimento",
            Cue::Run => "Correr",
            Cue::Walk => "Caminhar",
            Cue::Cooldown => "Resfriar",
            Cue::Finish => "Treino concluído",
        }
    }
}

const WARMUP_KEYWORDS: &[&str] = &["aquec"];
const RUN_KEYWORDS: &[&str] = &["correr", "tiro", "ritmo", "longo", "rodagem"];
const WALK_KEYWORDS: &[&str] = &["caminhar", "andar", "recup"];
const COOLDOWN_KEYWORDS: &[&str] = &["resfriar"];

const PRIORITY: [(CueCategory, &[&str]); 4] = [
    (CueCategory::Warmup, WARMUP_KEYWORDS),
    (CueCategory::Run, RUN_KEYWORDS),
    (CueCategory::Walk, WALK_KEYWORDS),
    (CueCategory::Cooldown, COOLDOWN_KEYWORDS),
];

/// Classify a step by its display name.
pub fn classify(step_name: &str) -> CueCategory {
    let name = step_name.to_lowercase();
    PRIORITY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(CueCategory::None)
}

/// Sink for cues emitted by the runner. Fire-and-forget.
pub trait Announcer: Send {
    fn announce(&mut self, cue: Cue);
}

#[derive(Debug, Error)]
#[error("playback failed: {0}")]
pub struct PlaybackError(pub String);

/// Audio/speech backend.
pub trait Playback: Send {
    fn play(&mut self, cue: Cue) -> Result<(), PlaybackError>;
    fn stop(&mut self, cue: Cue);
}

/// Announcer that lets only one cue play at a time.
pub struct ExclusiveAnnouncer<P: Playback> {
    playback: P,
    active: Option<Cue>,
    enabled: bool,
}

impl<P: Playback> ExclusiveAnnouncer<P> {
    pub fn new(playback: P) -> Self {
        Self {
            playback,
            active: None,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.silence();
        }
    }

    pub fn active(&self) -> Option<Cue> {
        self.active
    }

    /// Stop whatever is playing.
    pub fn silence(&mut self) {
        if let Some(prev) = self.active.take() {
            self.playback.stop(prev);
        }
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }
}

impl<P: Playback> Announcer for ExclusiveAnnouncer<P> {
    fn announce(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        self.silence();
        match self.playback.play(cue) {
            Ok(()) => self.active = Some(cue),
            Err(err) => tracing::warn!(?cue, %err, "cue playback failed"),
        }
    }
}

/// Playback that only logs. Used when no audio backend is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPlayback;

impl Playback for LogPlayback {
    fn play(&mut self, cue: Cue) -> Result<(), PlaybackError> {
        tracing::info!(?cue, asset = cue.asset(), phrase = cue.phrase(), "cue");
        Ok(())
    }

    fn stop(&mut self, cue: Cue) {
        tracing::debug!(?cue, "cue stopped");
    }
}

/// Announcer that records cues in order. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct CueRecorder {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues().into_iter().filter(|c| *c == cue).count()
    }
}

impl Announcer for CueRecorder {
    fn announce(&mut self, cue: Cue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}
