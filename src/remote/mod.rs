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

//! Remote music-service contract.
//!
//! The cache never talks to the music service directly. It is handed an
//! implementation of [`RemoteClient`] at construction, which keeps the remote
//! session out of global state and lets tests substitute a fake service.

use std::path::Path;

use thiserror::Error;

use crate::model::TrackRecord;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("not logged in to the music service")]
    Unauthorized,

    #[error("music service request failed: {0}")]
    Request(String),
}

/// One entry of the remote track listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub id: String,
}

impl From<RemoteTrack> for TrackRecord {
    fn from(track: RemoteTrack) -> Self {
        Self {
            title: track.title,
            artist: track.artist,
            album: track.album,
            remote_id: track.id,
        }
    }
}

/// Capabilities of the authenticated music-service client.
///
/// Every method may block on the network; the cache only calls them from its
/// worker pool (and `login` once, at construction).
pub trait RemoteClient: Send + Sync {
    /// Logs in with the stored credential, or with whatever default the
    /// client has when no credential file exists.
    fn login(&self, credential: Option<&Path>) -> bool;

    /// Lists every track of the user's library.
    fn list_tracks(&self) -> Result<Vec<RemoteTrack>, RemoteError>;

    /// Fetches the raw audio payload of a track. An empty payload means the
    /// service had nothing to give this time.
    fn fetch_track_bytes(&self, remote_id: &str) -> Result<Vec<u8>, RemoteError>;
}

/// A client that can also run the interactive authorization flow which
/// stores a fresh credential.
pub trait CredentialAuthorizer: RemoteClient {
    fn authorize(&self, storage_path: &Path) -> Result<(), RemoteError>;
}
