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

//! Track downloads into the local audio cache.
//!
//! The cache is a flat directory of audio files named by the caller. A file
//! only appears under its final name once the complete payload has been
//! written: data goes to a temporary file in the same directory which is then
//! renamed into place.

use std::{
    fs,
    io::Write,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    error::CacheError,
    model::{DownloadOutcome, DownloadRequest},
    remote::RemoteClient,
};

pub(crate) const MAX_ATTEMPTS: u32 = 3;

pub struct Downloader {
    client: Arc<dyn RemoteClient>,
    cache_dir: PathBuf,
}

impl Downloader {
    pub fn new(client: Arc<dyn RemoteClient>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Downloads a track into the cache directory.
    ///
    /// The payload is fetched up to [`MAX_ATTEMPTS`] times in a row, stopping
    /// at the first non-empty one. A remote error and an empty payload are
    /// treated alike.
    ///
    /// # Returns
    ///
    /// [`DownloadOutcome::Completed`] with the final path, or
    /// [`DownloadOutcome::Unavailable`] if every attempt came back empty. In
    /// the latter case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the expected filename is not a plain file name, or
    /// if the payload could not be written to disk.
    pub fn download(&self, request: &DownloadRequest) -> Result<DownloadOutcome, CacheError> {
        if !is_plain_filename(&request.expected_filename) {
            return Err(CacheError::InvalidFilename(request.expected_filename.clone()));
        }

        let Some(payload) = self.fetch_with_retry(&request.remote_id) else {
            warn!(remote_id = %request.remote_id, attempts = MAX_ATTEMPTS, "track unavailable");
            return Ok(DownloadOutcome::Unavailable {
                attempts: MAX_ATTEMPTS,
            });
        };

        let target = self.cache_dir.join(&request.expected_filename);
        self.write_atomically(&target, &payload)?;

        info!(
            remote_id = %request.remote_id,
            path = %target.display(),
            bytes = payload.len(),
            "track downloaded"
        );

        Ok(DownloadOutcome::Completed(target))
    }

    fn fetch_with_retry(&self, remote_id: &str) -> Option<Vec<u8>> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.client.fetch_track_bytes(remote_id) {
                Ok(payload) if !payload.is_empty() => return Some(payload),
                Ok(_) => debug!(remote_id, attempt, "empty payload"),
                Err(e) => debug!(remote_id, attempt, error = %e, "fetch failed"),
            }
        }

        None
    }

    fn write_atomically(&self, target: &Path, payload: &[u8]) -> Result<(), CacheError> {
        let write_err = |source| CacheError::Write {
            path: target.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.cache_dir).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(&self.cache_dir).map_err(write_err)?;
        file.write_all(payload).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(target).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

/// Whether `name` is a single normal path component, i.e. it names a file
/// directly inside the cache directory.
fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
