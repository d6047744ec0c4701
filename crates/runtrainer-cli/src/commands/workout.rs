use std::str::FromStr;

use clap::Subcommand;
use runtrainer_core::workout::format_clock;
use runtrainer_core::{flatten, Category, StepKind, Workout, WorkoutDraft, WorkoutStep};

use super::open_session;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List workouts
    List {
        /// Only this category (custom, 5k, 10k, 21k, 42k)
        #[arg(long)]
        category: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a workout and its expanded steps
    Show {
        id: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a custom workout
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Step `KIND:DURATION` or loop `CYCLES*KIND:DURATION,KIND:DURATION`,
        /// in order. KIND is run, walk, warmup or cool; DURATION is `M:SS`
        /// or seconds. Example: `--node warmup:5:00 --node "4*run:1:00,walk:1:30"`
        #[arg(long = "node")]
        nodes: Vec<String>,
    },
    /// Delete a custom workout
    Delete { id: String },
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session()?;

    match action {
        WorkoutAction::List { category, json } => {
            let categories = match category {
                Some(c) => vec![Category::from_str(&c)?],
                None => Category::ALL.to_vec(),
            };
            let workouts: Vec<&Workout> = categories
                .into_iter()
                .flat_map(|c| session.catalog().list(c))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&workouts)?);
                return Ok(());
            }
            for w in workouts {
                let mark = if session.ledger().is_completed(&w.id) { "✓" } else { " " };
                println!(
                    "{mark} {:<38} {:>4} min  {}",
                    w.id,
                    w.total_duration_secs() / 60,
                    w.title
                );
            }
        }
        WorkoutAction::Show { id, json } => {
            let workout = session
                .catalog()
                .find(&id)
                .ok_or_else(|| format!("workout not found: {id}"))?;
            let queue = flatten(&workout.structure);

            if json {
                let value = serde_json::json!({
                    "workout": workout,
                    "queue": queue,
                    "total_secs": queue.total_duration_secs(),
                    "completed": session.ledger().is_completed(&id),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{} [{}]", workout.title, workout.category.title());
            if !workout.description.is_empty() {
                println!("{}", workout.description);
            }
            for (i, step) in queue.iter().enumerate() {
                println!("{:>3}. {:<12} {}", i + 1, step.name, format_clock(step.duration_secs.into()));
            }
            let label = if session.ledger().is_completed(&id) { "Repetir" } else { "Iniciar" };
            println!(
                "{} passos, {} min  ({label})",
                queue.len(),
                queue.total_duration_secs() / 60
            );
        }
        WorkoutAction::Create {
            title,
            description,
            nodes,
        } => {
            let mut draft = WorkoutDraft::new(title, description);
            for node in &nodes {
                add_node(&mut draft, node)?;
            }
            let workout =
                session
                    .catalog_mut()
                    .create(&draft.title, &draft.description, draft.structure)?;
            println!("{}", workout.id);
        }
        WorkoutAction::Delete { id } => {
            session.catalog_mut().delete(&id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn add_node(draft: &mut WorkoutDraft, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    match input.split_once('*') {
        Some((cycles, items)) => {
            let cycles: u32 = cycles
                .trim()
                .parse()
                .map_err(|_| format!("invalid cycle count in '{input}'"))?;
            let items = items
                .split(',')
                .map(|item| -> Result<WorkoutStep, Box<dyn std::error::Error>> {
                    let (kind, secs) = parse_step(item)?;
                    Ok(WorkoutStep::of_kind(kind, secs))
                })
                .collect::<Result<Vec<_>, _>>()?;
            draft.add_loop(cycles, items)?;
        }
        None => {
            let (kind, secs) = parse_step(input)?;
            draft.add_step(kind, secs / 60, secs % 60)?;
        }
    }
    Ok(())
}

/// `KIND:M:SS` or `KIND:SECS`.
fn parse_step(input: &str) -> Result<(StepKind, u32), Box<dyn std::error::Error>> {
    let (kind, duration) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:DURATION, got '{input}'"))?;
    let kind = StepKind::from_str(kind)?;
    let secs = match duration.split_once(':') {
        Some((m, s)) => {
            let m: u32 = m.parse().map_err(|_| format!("invalid minutes in '{input}'"))?;
            let s: u32 = s.parse().map_err(|_| format!("invalid seconds in '{input}'"))?;
            m.saturating_mul(60).saturating_add(s)
        }
        None => duration
            .parse()
            .map_err(|_| format!("invalid duration in '{input}'"))?,
    };
    Ok((kind, secs))
}
