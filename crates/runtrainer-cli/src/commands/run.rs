use std::io::BufRead;
use std::time::Duration;

use clap::Args;
use runtrainer_core::cue::{ExclusiveAnnouncer, LogPlayback};
use runtrainer_core::timer::{spawn_run, RunCommand, RunOutcome};
use runtrainer_core::workout::format_clock;
use runtrainer_core::Event;
use tokio::sync::mpsc;

use super::open_session;

#[derive(Args)]
pub struct RunArgs {
    /// Workout id (see `workout list`)
    id: String,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Ignore stdin. Otherwise: Enter or `p` toggles pause, `s` skips,
    /// `q` abandons.
    #[arg(long)]
    no_input: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session()?;
    let runner = session.start_run(&args.id)?;
    let steps = runner.queue().len();

    let mut announcer = ExclusiveAnnouncer::new(LogPlayback);
    announcer.set_enabled(session.config().announcements.enabled);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create runtime: {e}"))?;

    let outcome = rt.block_on(async {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let handle = spawn_run(runner, Box::new(announcer), events_tx);
        if !args.no_input {
            spawn_stdin_reader(handle.commands());
        }

        let mut status = tokio::time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                event = events_rx.recv() => {
                    let Some(event) = event else { break };
                    if session.on_event(&event) {
                        tracing::debug!(id = %args.id, "progress recorded");
                    }
                    print_event(&event, args.json, steps);
                }
                _ = status.tick(), if !args.json => {
                    if let Some(snapshot) = handle.snapshot().await {
                        print_status(&snapshot);
                    }
                }
            }
        }
        handle.finished(&args.id).await
    });

    match outcome {
        RunOutcome::Completed { .. } => Ok(()),
        RunOutcome::Abandoned { workout_id } => Err(format!("run abandoned: {workout_id}").into()),
    }
}

/// Read single-letter commands from stdin on a plain thread. EOF just stops
/// reading; the run goes on.
fn spawn_stdin_reader(commands: mpsc::UnboundedSender<RunCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = match line.trim() {
                "" | "p" => RunCommand::TogglePause,
                "s" => RunCommand::Skip,
                "q" => RunCommand::Abandon,
                other => {
                    eprintln!("unknown command '{other}' (p = pause, s = skip, q = quit)");
                    continue;
                }
            };
            if commands.send(command).is_err() {
                break;
            }
        }
    });
}

fn print_status(snapshot: &Event) {
    if let Event::StateSnapshot {
        step_name: Some(name),
        next_step_name,
        remaining_secs,
        progress_pct,
        ..
    } = snapshot
    {
        let next = next_step_name.as_deref().unwrap_or("fim");
        println!(
            "   {name} {}  ({progress_pct:.0}%, depois: {next})",
            format_clock(u64::from(*remaining_secs))
        );
    }
}

fn print_event(event: &Event, json: bool, steps: usize) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "could not encode event"),
        }
        return;
    }

    match event {
        Event::CountdownStarted { from, .. } => println!("Prepare-se... {from}"),
        Event::CountdownTick { value, .. } if *value > 0 => println!("{value}"),
        Event::CountdownGo { .. } => println!("GO!"),
        Event::StepStarted {
            step_index,
            step_name,
            duration_secs,
            ..
        } => println!(
            "> {}/{steps} {step_name} {}",
            step_index + 1,
            format_clock(u64::from(*duration_secs))
        ),
        Event::RunPaused { remaining_secs, .. } => {
            println!("|| pausado ({})", format_clock(u64::from(*remaining_secs)))
        }
        Event::RunResumed { .. } => println!("> retomado"),
        Event::StepSkipped { .. } => println!(">> pulado"),
        Event::WorkoutFinished { .. } => println!("Treino concluído!"),
        Event::RunAbandoned { .. } => println!("Treino abandonado"),
        _ => {}
    }
}
