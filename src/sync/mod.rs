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

//! Catalog synchronization.
//!
//! A refresh always mirrors the complete remote listing. Remote deletions and
//! renames are not otherwise observable, so there is no incremental path.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{db::TrackStore, error::StoreError, model::TrackRecord, remote::RemoteClient};

pub struct CatalogSync {
    client: Arc<dyn RemoteClient>,
    store: TrackStore,
}

impl CatalogSync {
    pub fn new(client: Arc<dyn RemoteClient>, store: TrackStore) -> Self {
        Self { client, store }
    }

    /// Replaces the local catalog with the current remote listing.
    ///
    /// An empty or failed listing leaves the existing catalog untouched and
    /// returns `None`.
    ///
    /// # Returns
    ///
    /// The number of records now in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the listing could not be written. The
    /// previous catalog is still in place in that case.
    pub fn refresh(&self) -> Result<Option<usize>, StoreError> {
        let tracks = match self.client.list_tracks() {
            Ok(tracks) if !tracks.is_empty() => tracks,
            Ok(_) => {
                warn!("remote listing is empty, keeping current catalog");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "remote listing unavailable, keeping current catalog");
                return Ok(None);
            }
        };

        let records: Vec<TrackRecord> = tracks.into_iter().map(TrackRecord::from).collect();
        let count = self.store.replace_all(&records)?;

        info!(count, "catalog refreshed");

        Ok(Some(count))
    }
}
