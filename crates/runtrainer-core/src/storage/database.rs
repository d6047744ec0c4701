//! SQLite-backed document store.
//!
//! Provides persistent storage for:
//! - Custom workouts, one JSON document per row, scoped by identity
//! - Completed-workout sets, one document per identity

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{data_dir, WorkoutStore};
use crate::error::StoreError;
use crate::identity::Identity;
use crate::workout::Workout;

/// SQLite database for workout documents.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database at `~/.config/runtrainer/runtrainer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::open_at(&dir.join("runtrainer.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("database lock poisoned".into()))
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS custom_workouts (
            identity    TEXT NOT NULL,
            id          TEXT NOT NULL,
            document    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            PRIMARY KEY (identity, id)
        );

        CREATE TABLE IF NOT EXISTS progress (
            identity    TEXT PRIMARY KEY,
            completed   TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_custom_workouts_created_at
            ON custom_workouts(identity, created_at);",
    )
}

impl WorkoutStore for SqliteStore {
    fn load_custom_workouts(&self, identity: &Identity) -> Result<Vec<Workout>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT document FROM custom_workouts
             WHERE identity = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![identity.as_str()], |row| row.get::<_, String>(0))?;

        let mut workouts = Vec::new();
        for row in rows {
            let document = row?;
            match serde_json::from_str::<Workout>(&document) {
                Ok(workout) => workouts.push(workout),
                // One bad document should not hide the rest.
                Err(e) => tracing::warn!(%identity, error = %e, "skipping unreadable workout"),
            }
        }
        Ok(workouts)
    }

    fn save_custom_workout(
        &self,
        identity: &Identity,
        workout: &Workout,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let created_at = workout.created_at.unwrap_or_else(Utc::now);
        let mut stored = workout.clone();
        stored.id = id.clone();
        stored.created_at = Some(created_at);
        let document = serde_json::to_string(&stored)?;

        self.conn()?.execute(
            "INSERT INTO custom_workouts (identity, id, document, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                identity.as_str(),
                id,
                document,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(id)
    }

    fn delete_custom_workout(&self, identity: &Identity, id: &str) -> Result<(), StoreError> {
        let deleted = self.conn()?.execute(
            "DELETE FROM custom_workouts WHERE identity = ?1 AND id = ?2",
            params![identity.as_str(), id],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn load_progress(&self, identity: &Identity) -> Result<BTreeSet<String>, StoreError> {
        let conn = self.conn()?;
        let document: Option<String> = conn
            .query_row(
                "SELECT completed FROM progress WHERE identity = ?1",
                params![identity.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match document {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(BTreeSet::new()),
        }
    }

    fn save_progress(
        &self,
        identity: &Identity,
        completed: &BTreeSet<String>,
    ) -> Result<(), StoreError> {
        let document = serde_json::to_string(completed)?;
        self.conn()?.execute(
            "INSERT OR REPLACE INTO progress (identity, completed, updated_at)
             VALUES (?1, ?2, ?3)",
            params![identity.as_str(), document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
