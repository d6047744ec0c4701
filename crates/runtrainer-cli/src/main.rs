use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "runtrainer", version, about = "Runtrainer interval timer and training plans")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Training plans and progress per category
    Plans,
    /// Browse, author and delete workouts
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Run a workout in real time
    Run(commands::run::RunArgs),
    /// Completed workouts
    Progress {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Anonymous identity
    Identity {
        #[command(subcommand)]
        action: commands::identity::IdentityAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("RUNTRAINER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plans => commands::plans::run(),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Run(args) => commands::run::run(args),
        Commands::Progress { json } => commands::plans::progress(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Identity { action } => commands::identity::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
