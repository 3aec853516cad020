// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Data access layer.
//!
//! This module owns the SQLite file that mirrors the remote catalog. The
//! catalog is one denormalized table which is replaced wholesale on every
//! refresh and is otherwise only read.
//!
//! # Tables
//!
//! * `tracks` - One row per remote catalog entry (`title`, `artist`, `album`,
//!   `gpmid`).
//!
//! # Connections
//!
//! Every operation opens its own connection and drops it before returning, so
//! no lock is held between operations and any operation can be retried on its
//! own. Connections run in WAL mode: a reader always sees the last committed
//! catalog, even while a replace is in flight on another worker.

mod model;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use tracing::debug;

use crate::{
    error::StoreError,
    model::{TrackRecord, remote_id_from_key},
};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the persisted catalog.
///
/// The handle only stores the database location; it is cheap to clone and
/// safe to share between workers.
#[derive(Debug, Clone)]
pub struct TrackStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl TrackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Sets how long an operation waits for another connection's write lock
    /// before failing.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the whole catalog with `records`.
    ///
    /// The table is dropped, recreated and filled inside one immediate
    /// transaction. If anything fails before the commit, the transaction is
    /// rolled back and the previous catalog stays in place.
    ///
    /// # Returns
    ///
    /// The number of records written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the database cannot be opened or any
    /// statement fails.
    pub fn replace_all(&self, records: &[TrackRecord]) -> Result<usize, StoreError> {
        let mut conn = open_db(&self.path, self.busy_timeout)?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute_batch("DROP TABLE IF EXISTS tracks;")?;
        create_schema(&tx)?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO tracks (title, artist, album, gpmid) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.title,
                    record.artist,
                    record.album,
                    record.remote_id
                ])?;
            }
        }

        tx.commit()?;

        debug!(path = %self.path.display(), count = records.len(), "replaced catalog");

        Ok(records.len())
    }

    /// Searches the catalog for records matching all `terms`, in order.
    ///
    /// The terms are joined with `%` and matched with `LIKE` against the
    /// title, artist and album joined by spaces, so `["kai", "dream"]` matches
    /// any record where "kai" appears somewhere before "dream". An empty slice
    /// matches every record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the database cannot be opened or the query
    /// fails. No matching rows is not an error.
    pub fn search<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<TrackRecord>, StoreError> {
        let conn = open_db(&self.path, self.busy_timeout)?;

        let joined = terms
            .iter()
            .map(|term| term.as_ref())
            .collect::<Vec<&str>>()
            .join("%");
        let pattern = format!("%{joined}%");

        let sql = "
            SELECT title, artist, album, gpmid
            FROM tracks
            WHERE title || ' ' || artist || ' ' || album LIKE ?
            ORDER BY rowid
        ";

        let mut stmt = conn.prepare(sql)?;
        let results = stmt
            .query_map([pattern], TrackRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Looks up a record by composite key (`namespace:kind:id`).
    ///
    /// Only the third segment of the key is matched against the stored id. If
    /// that segment is missing or empty the database is not touched at all.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the database cannot be opened or the query
    /// fails.
    pub fn find_by_id(&self, key: &str) -> Result<Option<TrackRecord>, StoreError> {
        let Some(remote_id) = remote_id_from_key(key) else {
            debug!(key, "composite key has no id segment");
            return Ok(None);
        };

        let conn = open_db(&self.path, self.busy_timeout)?;

        let result = conn
            .query_row(
                "SELECT title, artist, album, gpmid FROM tracks WHERE gpmid = ?",
                [remote_id],
                TrackRecord::from_row,
            )
            .optional()?;

        Ok(result)
    }

    /// Counts the records in the current catalog.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = open_db(&self.path, self.busy_timeout)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Opens a connection to the SQLite database and prepares it for use.
///
/// This function performs the following setup:
/// * **Busy timeout**: Waits for a concurrent writer instead of failing.
/// * **WAL Mode**: Readers see the last committed catalog during a replace.
/// * **Schema**: Executes [`create_schema`] so a first run sees an empty
///   catalog rather than a missing table.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * WAL journaling cannot be enabled.
/// * The schema initialization fails.
fn open_db(path: &Path, busy_timeout: Duration) -> Result<Connection, StoreError> {
    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    conn.busy_timeout(busy_timeout)?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        return Err(StoreError::JournalMode(journal_mode));
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Creates the catalog table if it does not already exist.
fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tracks (
            title TEXT NOT NULL DEFAULT '',
            artist TEXT NOT NULL DEFAULT '',
            album TEXT NOT NULL DEFAULT '',
            gpmid TEXT NOT NULL
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests;
