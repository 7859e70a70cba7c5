//! SQLite-based fast storage.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that text
//! ordering matches chronological ordering.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{data_dir, migrations, FastRepository};
use crate::error::StorageError;
use crate::fast::{Fast, FastId, Mood, TargetInterval};

const SELECT_FAST: &str = "SELECT id, start_date, end_date, target_interval, mood FROM fasts";

/// SQLite database for fast storage.
pub struct Database {
    conn: Connection,
}

/// A row as stored, before validation.
struct RawFast {
    id: i64,
    start_date: String,
    end_date: Option<String>,
    target_interval: i64,
    mood: Option<u8>,
}

impl RawFast {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            start_date: row.get(1)?,
            end_date: row.get(2)?,
            target_interval: row.get(3)?,
            mood: row.get(4)?,
        })
    }

    fn into_fast(self) -> Result<Fast, StorageError> {
        let start_date = parse_timestamp(&self.start_date)?;
        let end_date = self.end_date.as_deref().map(parse_timestamp).transpose()?;
        let target_interval = TargetInterval::from_secs(self.target_interval)
            .map_err(|e| StorageError::Corrupt(format!("fast {}: {e}", self.id)))?;
        let mood = self
            .mood
            .map(Mood::try_from)
            .transpose()
            .map_err(|e| StorageError::Corrupt(format!("fast {}: {e}", self.id)))?;
        Ok(Fast::from_parts(
            FastId(self.id),
            start_date,
            end_date,
            target_interval,
            mood,
        ))
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt(format!("bad timestamp '{s}': {e}")))
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/fasting/fasting.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        Self::open_at(dir.join("fasting.db"))
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }

    fn query_fasts(&self, sql: &str) -> Result<Vec<Fast>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], RawFast::from_row)?;
        let mut fasts = Vec::new();
        for row in rows {
            fasts.push(row?.into_fast()?);
        }
        Ok(fasts)
    }
}

impl FastRepository for Database {
    fn create(
        &mut self,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        target_interval: TargetInterval,
    ) -> Result<Fast, StorageError> {
        self.conn.execute(
            "INSERT INTO fasts (start_date, end_date, target_interval) VALUES (?1, ?2, ?3)",
            params![
                format_timestamp(start_date),
                end_date.map(format_timestamp),
                i64::from(target_interval),
            ],
        )?;
        let id = FastId(self.conn.last_insert_rowid());
        Ok(Fast::from_parts(id, start_date, end_date, target_interval, None))
    }

    fn get(&self, id: FastId) -> Result<Option<Fast>, StorageError> {
        let raw = self
            .conn
            .query_row(
                &format!("{SELECT_FAST} WHERE id = ?1"),
                params![id.0],
                RawFast::from_row,
            )
            .optional()?;
        raw.map(RawFast::into_fast).transpose()
    }

    fn update(&mut self, fast: &Fast) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            "UPDATE fasts SET end_date = ?1, mood = ?2 WHERE id = ?3",
            params![
                fast.end_date().map(format_timestamp),
                fast.mood().map(u8::from),
                fast.id().0,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound { id: fast.id().0 });
        }
        Ok(())
    }

    fn delete(&mut self, id: FastId) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM fasts WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(StorageError::NotFound { id: id.0 });
        }
        Ok(())
    }

    fn list_completed(&self) -> Result<Vec<Fast>, StorageError> {
        self.query_fasts(&format!(
            "{SELECT_FAST} WHERE end_date IS NOT NULL ORDER BY end_date DESC, id DESC"
        ))
    }

    fn active(&self) -> Result<Option<Fast>, StorageError> {
        let mut fasts = self.query_fasts(&format!("{SELECT_FAST} WHERE end_date IS NULL LIMIT 1"))?;
        Ok(fasts.pop())
    }
}
