//! Generated training plans.
//!
//! Plans are computed, never persisted, and cannot be deleted. Step names
//! use the same labels as authored steps so cue classification applies.

use crate::workout::{Category, Workout, WorkoutLoop, WorkoutNode, WorkoutStep, WorkoutStructure};

const WARMUP_COLOR: &str = "#eab308";
const RUN_COLOR: &str = "#ef4444";
const WALK_COLOR: &str = "#3b82f6";
const COOL_COLOR: &str = "#10b981";
const BRIDGE_RUN_COLOR: &str = "#8b5cf6";
const HALF_COLOR: &str = "#f59e0b";
const MARATHON_COLOR: &str = "#f43f5e";

fn warmup(secs: u32) -> WorkoutNode {
    WorkoutNode::Step(WorkoutStep::new("Aquecer", secs, WARMUP_COLOR))
}

fn cooldown(secs: u32) -> WorkoutNode {
    WorkoutNode::Step(WorkoutStep::new("Resfriar", secs, COOL_COLOR))
}

fn main_step(name: &str, secs: u32, color: &str) -> WorkoutNode {
    WorkoutNode::Step(WorkoutStep::new(name, secs, color))
}

fn intervals(cycles: u32, run: u32, run_color: &str, walk: u32) -> WorkoutNode {
    WorkoutNode::Loop(WorkoutLoop::new(
        cycles,
        vec![
            WorkoutStep::new("Correr", run, run_color),
            WorkoutStep::new("Andar", walk, WALK_COLOR),
        ],
    ))
}

fn plan_workout(
    id: String,
    category: Category,
    title: String,
    description: String,
    nodes: Vec<WorkoutNode>,
) -> Workout {
    Workout {
        id,
        category,
        title,
        description,
        structure: WorkoutStructure::new(nodes),
        created_at: None,
    }
}

fn rounded_minutes(secs: u32) -> u32 {
    (secs + 30) / 60
}

/// Nine-week couch-to-5K: run/walk intervals, then continuous runs.
pub fn couch_to_5k() -> Vec<Workout> {
    let mut plan = Vec::new();
    let day = |week: u32, day: u32, description: String, nodes: Vec<WorkoutNode>| {
        plan_workout(
            format!("c25k_w{week}_d{day}"),
            Category::FiveK,
            format!("Semana {week} - Dia {day}"),
            description,
            nodes,
        )
    };

    for week in 1..=4 {
        let run = 60 + week * 30;
        let walk = 120 - week * 15;
        for d in 1..=3 {
            plan.push(day(
                week,
                d,
                format!("Intervalado: Correr {run}s / Andar {walk}s"),
                vec![warmup(300), intervals(8 - week, run, RUN_COLOR, walk), cooldown(300)],
            ));
        }
    }

    plan.push(day(
        5,
        1,
        "3x 5min corrida".into(),
        vec![warmup(300), intervals(3, 300, RUN_COLOR, 180), cooldown(300)],
    ));
    plan.push(day(
        5,
        2,
        "2x 8min corrida".into(),
        vec![warmup(300), intervals(2, 480, RUN_COLOR, 300), cooldown(300)],
    ));
    plan.push(day(
        5,
        3,
        "O Grande Salto: 20min".into(),
        vec![warmup(300), main_step("Correr", 1200, RUN_COLOR), cooldown(300)],
    ));

    for week in 6..=9 {
        let secs = if week == 9 { 1800 } else { 1200 + (week - 5) * 180 };
        for d in 1..=3 {
            plan.push(day(
                week,
                d,
                format!("Corrida Contínua: {} min", rounded_minutes(secs)),
                vec![warmup(300), main_step("Correr", secs, RUN_COLOR), cooldown(300)],
            ));
        }
    }
    plan
}

/// Six-week bridge from 5K to 10K: growing volume split into ~10 minute runs.
pub fn bridge_to_10k() -> Vec<Workout> {
    let mut plan = Vec::new();
    for week in 1..=6u32 {
        let volume = 1800 + week * 300;
        let cycles = (volume / 600).max(1);
        let run = volume / cycles;
        for d in 1..=3 {
            plan.push(plan_workout(
                format!("10k_w{week}_d{d}"),
                Category::TenK,
                format!("Semana {week} - Dia {d}"),
                format!("Volume Total: {}min", rounded_minutes(volume)),
                vec![warmup(300), intervals(cycles, run, BRIDGE_RUN_COLOR, 60), cooldown(300)],
            ));
        }
    }
    plan
}

/// Ten-week half marathon: recovery jog, tempo run and long run each week.
pub fn half_marathon() -> Vec<Workout> {
    let mut plan = Vec::new();
    for week in 1..=10u32 {
        plan.push(plan_workout(
            format!("21k_w{week}_d1"),
            Category::HalfMarathon,
            format!("Semana {week} - Recuperação"),
            "Rodagem leve".into(),
            vec![
                warmup(300),
                main_step("Rodagem", 2400 + week * 60, WALK_COLOR),
                cooldown(300),
            ],
        ));
        plan.push(plan_workout(
            format!("21k_w{week}_d2"),
            Category::HalfMarathon,
            format!("Semana {week} - Ritmo"),
            "Tempo Run".into(),
            vec![
                warmup(600),
                main_step("Ritmo", 1200 + week * 120, HALF_COLOR),
                cooldown(600),
            ],
        ));
        let long = if week == 10 { 7800 } else { 3600 + week * 600 };
        let description = if week == 10 { "A PROVA" } else { "Volume alto" };
        plan.push(plan_workout(
            format!("21k_w{week}_d3"),
            Category::HalfMarathon,
            format!("Semana {week} - Longão"),
            description.into(),
            vec![warmup(300), main_step("Longo", long, HALF_COLOR), cooldown(300)],
        ));
    }
    plan
}

/// Sixteen weekly marathon long runs with a taper and race week.
pub fn marathon() -> Vec<Workout> {
    (1..=16u32)
        .map(|week| {
            let long = match week {
                16 => 14400,
                14 | 15 => 5400,
                _ => 5400 + week * 600,
            };
            plan_workout(
                format!("42k_w{week}_d3"),
                Category::Marathon,
                format!("Semana {week} - Longão"),
                "Foco em distância".into(),
                vec![warmup(600), main_step("Longo", long, MARATHON_COLOR), cooldown(600)],
            )
        })
        .collect()
}

/// All generated plans, in display order.
pub fn generated_workouts() -> Vec<Workout> {
    let mut all = couch_to_5k();
    all.extend(bridge_to_10k());
    all.extend(half_marathon());
    all.extend(marathon());
    all
}
