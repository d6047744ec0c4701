//! Explicit session context.
//!
//! A [`Session`] owns everything one user's app instance needs: the
//! configuration, the optional identity, the catalog and the ledger.
//! Runs are built from it and their events are routed back into it.

use std::path::Path;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::identity::{get_or_create_identity_at, Identity};
use crate::progress::ProgressLedger;
use crate::storage::{Config, ScopedStore, SqliteStore, WorkoutStore};
use crate::timer::WorkoutRunner;

#[derive(Debug)]
pub struct Session {
    config: Config,
    identity: Option<Identity>,
    catalog: Catalog,
    ledger: ProgressLedger,
}

impl Session {
    /// Local-only session: generated plans, in-memory progress.
    pub fn local(config: Config) -> Self {
        Self {
            config,
            identity: None,
            catalog: Catalog::local(),
            ledger: ProgressLedger::local(),
        }
    }

    /// Session persisting through `store` under `identity`.
    pub fn with_store(config: Config, store: Arc<dyn WorkoutStore>, identity: Identity) -> Self {
        let scoped = ScopedStore::new(store, identity.clone());
        Self {
            config,
            identity: Some(identity),
            catalog: Catalog::load(scoped.clone()),
            ledger: ProgressLedger::load(scoped),
        }
    }

    /// Open the on-disk session in `data_dir`.
    ///
    /// With sync disabled the session is local-only and nothing is read
    /// or created on disk beyond the config.
    pub fn open(config: Config, data_dir: &Path) -> Result<Self> {
        if !config.sync.enabled {
            tracing::info!("sync disabled, starting local-only session");
            return Ok(Self::local(config));
        }

        let identity = get_or_create_identity_at(data_dir)?;
        let store = SqliteStore::open_at(&data_dir.join("runtrainer.db"))?;
        tracing::debug!(%identity, "session opened");
        Ok(Self::with_store(config, Arc::new(store), identity))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    /// Build a fresh runner for `workout_id`. Each call flattens the
    /// workout again.
    ///
    /// # Errors
    ///
    /// Unknown ids and workouts with nothing to run are rejected.
    pub fn start_run(&self, workout_id: &str) -> Result<WorkoutRunner> {
        let workout = self
            .catalog
            .find(workout_id)
            .ok_or_else(|| CoreError::WorkoutNotFound(workout_id.to_string()))?;
        let runner = WorkoutRunner::new(workout, self.config.timing())?;
        tracing::info!(
            workout_id,
            steps = runner.queue().len(),
            total_secs = runner.total_secs(),
            "run prepared"
        );
        Ok(runner)
    }

    /// Feed a run event. Returns true when it recorded a new completion.
    pub fn on_event(&mut self, event: &Event) -> bool {
        match event.finished_workout() {
            Some(id) => self.ledger.record_completion(id),
            None => false,
        }
    }
}
