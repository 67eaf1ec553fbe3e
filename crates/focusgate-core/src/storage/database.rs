//! SQLite-backed persistence.
//!
//! Two tables:
//! - `kv`: the key-value settings store. Keys mirror the original
//!   extension's storage schema (`dailyStats`, `workDuration`, ...), plus
//!   `controller` for the full controller snapshot.
//! - `sessions`: an append-only log of completed focus sessions, kept
//!   beyond the stats tracker's rolling window for the all-time view.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::data_dir;
use crate::error::{CoreError, DatabaseError};

pub const KEY_DAILY_STATS: &str = "dailyStats";
pub const KEY_WEEKLY_STATS: &str = "weeklyStats";
pub const KEY_WORK_DURATION: &str = "workDuration";
pub const KEY_BREAK_DURATION: &str = "breakDuration";
pub const KEY_BLOCKED_SITES: &str = "blockedSites";
pub const KEY_CONTROLLER: &str = "controller";

/// All-time focus totals from the sessions log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub sessions: u64,
    pub focus_minutes: u64,
}

/// SQLite database for settings and session history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focusgate/focusgate.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focusgate.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                focus_minutes INTEGER NOT NULL,
                started_at    TEXT NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Session log ──────────────────────────────────────────────────

    /// Append one completed focus session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        focus_minutes: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions (focus_minutes, started_at, completed_at)
             VALUES (?1, ?2, ?3)",
            params![
                focus_minutes,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn session_totals(&self) -> Result<SessionTotals, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*), COALESCE(SUM(focus_minutes), 0) FROM sessions")?;
        let (sessions, focus_minutes) =
            stmt.query_row([], |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)))?;
        Ok(SessionTotals {
            sessions,
            focus_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_set_get_overwrite_delete() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set(KEY_WORK_DURATION, "25").unwrap();
        assert_eq!(db.kv_get(KEY_WORK_DURATION).unwrap().as_deref(), Some("25"));

        db.kv_set(KEY_WORK_DURATION, "50").unwrap();
        assert_eq!(db.kv_get(KEY_WORK_DURATION).unwrap().as_deref(), Some("50"));

        db.kv_delete(KEY_WORK_DURATION).unwrap();
        assert_eq!(db.kv_get(KEY_WORK_DURATION).unwrap(), None);
    }

    #[test]
    fn session_totals_accumulate() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.session_totals().unwrap(), SessionTotals::default());

        let now = Utc::now();
        db.record_session(25, now - chrono::Duration::minutes(25), now)
            .unwrap();
        db.record_session(10, now - chrono::Duration::minutes(10), now)
            .unwrap();

        let totals = db.session_totals().unwrap();
        assert_eq!(totals.sessions, 2);
        assert_eq!(totals.focus_minutes, 35);
    }

    #[test]
    fn open_at_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusgate.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set(KEY_BLOCKED_SITES, r#"["example.com"]"#).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(
            db.kv_get(KEY_BLOCKED_SITES).unwrap().as_deref(),
            Some(r#"["example.com"]"#)
        );
    }
}
