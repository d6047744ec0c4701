use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A single timed activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutStep {
    pub name: String,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    /// Presentation hint, carried through untouched.
    #[serde(default)]
    pub color: String,
}

impl WorkoutStep {
    pub fn new(name: impl Into<String>, duration_secs: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            color: color.into(),
        }
    }

    /// Build a step from an authoring kind, using the kind's label and color.
    pub fn of_kind(kind: StepKind, duration_secs: u32) -> Self {
        Self::new(kind.label(), duration_secs, kind.color())
    }
}

/// A group of steps repeated `cycles` times. Loops do not nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLoop {
    #[serde(deserialize_with = "clamped_cycles")]
    pub cycles: u32,
    #[serde(default)]
    pub items: Vec<WorkoutStep>,
}

impl WorkoutLoop {
    pub fn new(cycles: u32, items: Vec<WorkoutStep>) -> Self {
        Self { cycles, items }
    }

    /// Duration of one pass over `items`.
    pub fn cycle_duration_secs(&self) -> u64 {
        self.items.iter().map(|s| u64::from(s.duration_secs)).sum()
    }
}

/// Stored documents may carry a negative count; such a loop runs zero times.
fn clamped_cycles<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let cycles = i64::deserialize(deserializer)?;
    Ok(u32::try_from(cycles.max(0)).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutNode {
    Step(WorkoutStep),
    Loop(WorkoutLoop),
}

/// The authored shape of a workout: an ordered list of steps and loops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutStructure(Vec<WorkoutNode>);

impl WorkoutStructure {
    pub fn new(nodes: Vec<WorkoutNode>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[WorkoutNode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_step(&mut self, step: WorkoutStep) {
        self.0.push(WorkoutNode::Step(step));
    }

    pub fn push_loop(&mut self, lp: WorkoutLoop) {
        self.0.push(WorkoutNode::Loop(lp));
    }

    /// Number of steps after loop expansion.
    pub fn expanded_len(&self) -> usize {
        self.0
            .iter()
            .map(|node| match node {
                WorkoutNode::Step(_) => 1,
                WorkoutNode::Loop(lp) => lp.items.len().saturating_mul(lp.cycles as usize),
            })
            .sum()
    }

    /// Total seconds after loop expansion.
    pub fn total_duration_secs(&self) -> u64 {
        self.0
            .iter()
            .map(|node| match node {
                WorkoutNode::Step(step) => u64::from(step.duration_secs),
                WorkoutNode::Loop(lp) => lp.cycle_duration_secs().saturating_mul(u64::from(lp.cycles)),
            })
            .sum()
    }

    /// Authoring-time checks: every step lasts at least a second and every
    /// loop repeats at least once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for node in &self.0 {
            match node {
                WorkoutNode::Step(step) => check_step(step)?,
                WorkoutNode::Loop(lp) => {
                    if lp.cycles == 0 {
                        return Err(ValidationError::InvalidCycles);
                    }
                    for step in &lp.items {
                        check_step(step)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_step(step: &WorkoutStep) -> Result<(), ValidationError> {
    if step.duration_secs == 0 {
        return Err(ValidationError::InvalidDuration {
            name: step.name.clone(),
        });
    }
    Ok(())
}

impl From<Vec<WorkoutNode>> for WorkoutStructure {
    fn from(nodes: Vec<WorkoutNode>) -> Self {
        Self(nodes)
    }
}

/// Plan category. `Custom` holds user-authored workouts; the others are
/// generated plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "21k")]
    HalfMarathon,
    #[serde(rename = "42k")]
    Marathon,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Custom,
        Category::FiveK,
        Category::TenK,
        Category::HalfMarathon,
        Category::Marathon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Custom => "custom",
            Category::FiveK => "5k",
            Category::TenK => "10k",
            Category::HalfMarathon => "21k",
            Category::Marathon => "42k",
        }
    }

    /// Display title shown on the category tab.
    pub fn title(self) -> &'static str {
        match self {
            Category::Custom => "Personalizado",
            Category::FiveK => "Rumo ao 5K",
            Category::TenK => "Rumo ao 10K",
            Category::HalfMarathon => "Meia Maratona",
            Category::Marathon => "Maratona",
        }
    }

    pub fn is_generated(self) -> bool {
        self != Category::Custom
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("unknown category '{s}' (expected custom, 5k, 10k, 21k or 42k)"),
            })
    }
}

/// Step kinds offered when authoring a custom workout. The kind decides the
/// step's label and color; it is not carried into execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Run,
    Walk,
    Warmup,
    Cool,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Run => "Correr",
            StepKind::Walk => "Caminhar",
            StepKind::Warmup => "Aquecer",
            StepKind::Cool => "Resfriar",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StepKind::Run => "#ef4444",
            StepKind::Walk => "#3b82f6",
            StepKind::Warmup => "#eab308",
            StepKind::Cool => "#10b981",
        }
    }
}

impl FromStr for StepKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Ok(StepKind::Run),
            "walk" => Ok(StepKind::Walk),
            "warmup" => Ok(StepKind::Warmup),
            "cool" | "cooldown" => Ok(StepKind::Cool),
            other => Err(ValidationError::InvalidValue {
                field: "step kind".into(),
                message: format!("unknown step kind '{other}' (expected run, walk, warmup or cool)"),
            }),
        }
    }
}

/// A workout: identity and metadata around a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub structure: WorkoutStructure,
    /// Set for custom workouts once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Workout {
    pub fn is_custom(&self) -> bool {
        self.category == Category::Custom
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.structure.total_duration_secs()
    }
}

/// Format seconds as `MM:SS`. Hours are dropped, matching the runner display.
pub fn format_clock(secs: u64) -> String {
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkoutStructure {
        WorkoutStructure::new(vec![
            WorkoutNode::Step(WorkoutStep::of_kind(StepKind::Warmup, 300)),
            WorkoutNode::Loop(WorkoutLoop::new(
                3,
                vec![
                    WorkoutStep::new("Correr", 60, "#ef4444"),
                    WorkoutStep::new("Andar", 90, "#3b82f6"),
                ],
            )),
            WorkoutNode::Step(WorkoutStep::of_kind(StepKind::Cool, 300)),
        ])
    }

    #[test]
    fn totals_account_for_cycles() {
        let s = sample();
        assert_eq!(s.expanded_len(), 8);
        assert_eq!(s.total_duration_secs(), 1050);
    }

    #[test]
    fn json_shape_uses_type_tags() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json[0]["type"], "step");
        assert_eq!(json[0]["name"], "Aquecer");
        assert_eq!(json[0]["duration"], 300);
        assert_eq!(json[1]["type"], "loop");
        assert_eq!(json[1]["cycles"], 3);
        assert_eq!(json[1]["items"][1]["name"], "Andar");
    }

    #[test]
    fn loop_items_accept_type_tag() {
        let json = r##"[{"type":"loop","cycles":2,"items":[{"type":"step","name":"Correr","duration":60,"color":"#ef4444"}]}]"##;
        let s: WorkoutStructure = serde_json::from_str(json).unwrap();
        assert_eq!(s.expanded_len(), 2);
    }

    #[test]
    fn negative_cycles_decode_as_zero() {
        let json = r##"{"id":"w1","category":"custom","title":"Antigo","structure":[
            {"type":"step","name":"Correr","duration":60,"color":"#ef4444"},
            {"type":"loop","cycles":-1,"items":[{"name":"Andar","duration":90,"color":"#3b82f6"}]}
        ]}"##;
        let workout: Workout = serde_json::from_str(json).unwrap();
        match &workout.structure.nodes()[1] {
            WorkoutNode::Loop(lp) => assert_eq!(lp.cycles, 0),
            other => panic!("expected loop, got {other:?}"),
        }
        assert_eq!(workout.structure.expanded_len(), 1);
        assert_eq!(workout.total_duration_secs(), 60);
        assert_eq!(crate::workout::flatten(&workout.structure).len(), 1);
        assert_eq!(workout.structure.validate(), Err(ValidationError::InvalidCycles));
    }

    #[test]
    fn validate_rejects_zero_duration_and_cycles() {
        let mut s = WorkoutStructure::default();
        s.push_step(WorkoutStep::new("Correr", 0, ""));
        assert!(matches!(
            s.validate(),
            Err(ValidationError::InvalidDuration { .. })
        ));

        let mut s = WorkoutStructure::default();
        s.push_loop(WorkoutLoop::new(0, vec![WorkoutStep::new("Correr", 10, "")]));
        assert_eq!(s.validate(), Err(ValidationError::InvalidCycles));

        assert!(sample().validate().is_ok());
    }

    #[test]
    fn category_parses_and_titles() {
        assert_eq!("5k".parse::<Category>().unwrap(), Category::FiveK);
        assert_eq!("42K".parse::<Category>().unwrap(), Category::Marathon);
        assert!("profile".parse::<Category>().is_err());
        assert_eq!(Category::HalfMarathon.title(), "Meia Maratona");
        assert!(!Category::Custom.is_generated());
    }

    #[test]
    fn step_kind_label_and_color() {
        let step = WorkoutStep::of_kind(StepKind::Walk, 90);
        assert_eq!(step.name, "Caminhar");
        assert_eq!(step.color, "#3b82f6");
        assert_eq!("cooldown".parse::<StepKind>().unwrap(), StepKind::Cool);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(3600 + 61), "01:01");
    }
}
