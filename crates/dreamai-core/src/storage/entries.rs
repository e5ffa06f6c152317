//! SQLite-based journal entry storage.
//!
//! Supplies a user's entries to callers, who hand them to the streak
//! engine. The engine never reads from here directly.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::{debug, info};

use crate::entry::JournalEntry;
use crate::error::{DatabaseError, Result};

/// SQLite database of journal entries.
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Open the store at `path`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "opened entry store");
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS entries (
                    id          TEXT PRIMARY KEY,
                    recorded_at TEXT NOT NULL,
                    title       TEXT NOT NULL DEFAULT '',
                    transcript  TEXT NOT NULL DEFAULT ''
                );

                CREATE INDEX IF NOT EXISTS idx_entries_recorded_at ON entries(recorded_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert an entry.
    ///
    /// # Errors
    /// Returns an error if the insert fails, e.g. on a duplicate id.
    pub fn add_entry(&self, entry: &JournalEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO entries (id, recorded_at, title, transcript)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id,
                stored_timestamp(entry.recorded_at),
                entry.title,
                entry.transcript,
            ],
        )?;
        debug!(id = %entry.id, "entry added");
        Ok(())
    }

    /// All entries, oldest first.
    pub fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recorded_at, title, transcript FROM entries ORDER BY recorded_at ASC",
        )?;
        let rows = stmt.query_map([], raw_row)?;
        collect_entries(rows)
    }

    /// Entries recorded at or after `since`, oldest first.
    pub fn list_entries_since(&self, since: DateTime<Utc>) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recorded_at, title, transcript FROM entries
             WHERE recorded_at >= ?1
             ORDER BY recorded_at ASC",
        )?;
        let rows = stmt.query_map(params![stored_timestamp(since)], raw_row)?;
        collect_entries(rows)
    }

    /// Delete an entry. Returns whether a row was removed.
    pub fn delete_entry(&self, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    pub fn count(&self) -> Result<u64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get::<_, u64>(0))?;
        Ok(n)
    }
}

/// Fixed-width UTC text so SQL comparisons order chronologically.
fn stored_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

type RawRow = (String, String, String, String);

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn collect_entries(
    rows: impl Iterator<Item = rusqlite::Result<RawRow>>,
) -> Result<Vec<JournalEntry>> {
    let mut entries = Vec::new();
    for row in rows {
        let (id, recorded_at, title, transcript) = row?;
        let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|e| DatabaseError::CorruptRow {
                id: id.clone(),
                message: e.to_string(),
            })?
            .with_timezone(&Utc);
        entries.push(JournalEntry {
            id,
            recorded_at,
            title,
            transcript,
        });
    }
    Ok(entries)
}
