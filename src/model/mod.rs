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

//! Domain models and core data structures.
//!
//! This module defines the entities that flow through the cache: catalog
//! entries as persisted in the track store, download requests and their
//! outcomes, and the free-form metadata handed to the playback sink.

use std::{collections::HashMap, path::PathBuf};

/// One entry of the remote catalog, as mirrored in the local track store.
///
/// Records are never patched in place; the whole catalog is replaced on each
/// refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub remote_id: String,
}

/// Extra metadata forwarded to the playback sink alongside a track, such as
/// who requested it or which channel it was requested from.
pub type TrackMeta = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub remote_id: String,
    pub expected_filename: String,
}

impl DownloadRequest {
    pub fn new(remote_id: impl Into<String>, expected_filename: impl Into<String>) -> Self {
        Self {
            remote_id: remote_id.into(),
            expected_filename: expected_filename.into(),
        }
    }
}

/// The result of a download once all attempts have been made.
///
/// Running out of attempts is an expected condition (the track may simply be
/// unavailable), so it is reported as a value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed(PathBuf),
    Unavailable { attempts: u32 },
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Completed(_))
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DownloadOutcome::Completed(path) => Some(path),
            DownloadOutcome::Unavailable { .. } => None,
        }
    }
}

/// Extracts the remote id from a composite `namespace:kind:id` key.
///
/// Only the third segment is meaningful; anything after it is ignored. A key
/// with a missing or empty third segment yields `None`.
pub fn remote_id_from_key(key: &str) -> Option<&str> {
    key.split(':').nth(2).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests;
