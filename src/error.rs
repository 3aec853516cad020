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

//! Error types shared across the cache layers.
//!
//! Conditions local to a component (an empty search, a missing probe binary)
//! resolve to empty or absent values and never show up here. The errors in
//! this module are the ones that block the intent of a request and must reach
//! the caller of the [`Library`](crate::Library) façade.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of the persisted track catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open track database at {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("track database refused WAL journaling (journal mode is `{0}`)")]
    JournalMode(String),

    #[error("track database query failed")]
    Query(#[from] rusqlite::Error),
}

/// Errors reported by the query façade and its workers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no catalog entry matches `{key}`")]
    Extraction { key: String },

    #[error("`{0}` is not a plain file name")]
    InvalidFilename(String),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("playback sink rejected track: {0}")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("worker pool dropped the task before it completed")]
    WorkerGone,
}
