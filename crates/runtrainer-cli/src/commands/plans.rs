use runtrainer_core::Category;
use serde::Serialize;

use super::open_session;

#[derive(Serialize)]
struct ProgressReport<'a> {
    identity: Option<&'a str>,
    total: usize,
    completed: Vec<&'a str>,
}

/// One line per category: key, title, workouts done / available.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session()?;
    for category in Category::ALL {
        let workouts = session.catalog().list(category);
        let done = workouts
            .iter()
            .filter(|w| session.ledger().is_completed(&w.id))
            .count();
        println!(
            "{:<7} {:<16} {done}/{}",
            category.as_str(),
            category.title(),
            workouts.len()
        );
    }
    Ok(())
}

pub fn progress(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session()?;
    let ledger = session.ledger();
    let report = ProgressReport {
        identity: session.identity().map(|i| i.as_str()),
        total: ledger.len(),
        completed: ledger.completed().iter().map(String::as_str).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Treinos concluídos: {}", report.total);
    for id in report.completed {
        let title = session
            .catalog()
            .find(id)
            .map(|w| w.title.as_str())
            .unwrap_or("");
        println!("  {id:<14} {title}");
    }
    Ok(())
}
