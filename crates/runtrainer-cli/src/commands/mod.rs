pub mod config;
pub mod identity;
pub mod plans;
pub mod run;
pub mod workout;

use runtrainer_core::storage::data_dir;
use runtrainer_core::{Config, Session};

/// Open the session for the current data directory.
pub fn open_session() -> Result<Session, Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    let config = Config::load_from(&dir.join("config.toml"))?;
    Ok(Session::open(config, &dir)?)
}
