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

//! The query façade used by the host application.
//!
//! [`Library`] is the only entry point a host needs. Every operation that can
//! block (catalog queries, refreshes, downloads, duration probes) is queued on
//! the worker pool and returns a [`Pending`] handle straight away, so a host
//! running a single-threaded event loop never stalls on I/O.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::info;

use crate::{
    auth::{self, AuthState},
    config::CacheConfig,
    db::TrackStore,
    download::Downloader,
    error::CacheError,
    model::{DownloadOutcome, DownloadRequest, TrackMeta, TrackRecord},
    player::PlaybackSink,
    probe::DurationProber,
    remote::RemoteClient,
    sync::CatalogSync,
    tasks::{CacheTask, Pending, TaskContext, WorkerPool},
};

pub struct Library {
    pool: WorkerPool,
    sink: Arc<dyn PlaybackSink>,
    auth_state: AuthState,
    cache_dir: PathBuf,
}

impl Library {
    /// Builds the façade and logs `client` in.
    ///
    /// This creates the config directory, logs in once (with the stored
    /// credential if there is one), locates the duration probe and starts the
    /// worker pool. A failed login does not fail construction; it is reported
    /// through [`auth_state`](Self::auth_state) and is not retried.
    ///
    /// Unlike every other operation, the login call and the probe lookup run
    /// on the calling thread, so this blocks for as long as `client.login`
    /// does. Construct the library off any latency-sensitive thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or the
    /// worker threads cannot be spawned.
    pub fn new(
        config: &CacheConfig,
        client: Arc<dyn RemoteClient>,
        sink: Arc<dyn PlaybackSink>,
    ) -> Result<Self, CacheError> {
        fs::create_dir_all(&config.config_dir)?;

        let auth_state = auth::login(client.as_ref(), &config.credential_path());

        let store = TrackStore::new(config.database_path());
        let ctx = TaskContext {
            sync: CatalogSync::new(Arc::clone(&client), store.clone()),
            downloader: Downloader::new(Arc::clone(&client), &config.cache_dir),
            prober: DurationProber::discover(&config.probe_binary),
            store,
            sink: Arc::clone(&sink),
        };

        let pool = WorkerPool::spawn(config.worker_count(), ctx)?;

        info!(
            workers = pool.size(),
            authenticated = auth_state.is_authenticated(),
            "library ready"
        );

        Ok(Self {
            pool,
            sink,
            auth_state,
            cache_dir: config.cache_dir.clone(),
        })
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_state.is_authenticated()
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Replaces the catalog with the remote listing.
    ///
    /// Resolves to `None`, leaving the catalog untouched, when the remote
    /// listing is empty or unavailable.
    pub fn refresh(&self) -> Pending<Option<usize>> {
        self.pool.submit(CacheTask::Refresh)
    }

    /// Finds catalog entries matching all `terms` in order.
    pub fn search<I, S>(&self, terms: I) -> Pending<Vec<TrackRecord>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        self.pool.submit(|reply| CacheTask::Search(terms, reply))
    }

    pub fn catalog_size(&self) -> Pending<usize> {
        self.pool.submit(CacheTask::CatalogSize)
    }

    /// Resolves a composite `namespace:kind:id` key and hands the track to
    /// the playback sink.
    ///
    /// Resolves to [`CacheError::Extraction`] if the catalog has no such
    /// track.
    pub fn play_by_id(&self, key: impl Into<String>, meta: TrackMeta) -> Pending<TrackRecord> {
        let key = key.into();
        self.pool.submit(|reply| CacheTask::PlayById(key, meta, reply))
    }

    /// Hands an already known track to the playback sink, skipping lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Playback`] if the sink rejects the track.
    pub fn play(&self, track: TrackRecord, meta: TrackMeta) -> Result<(), CacheError> {
        self.sink
            .enqueue(track, meta)
            .map_err(|e| CacheError::Playback(format!("{e:#}")))
    }

    /// Downloads a track into the cache directory.
    pub fn download(&self, request: DownloadRequest) -> Pending<DownloadOutcome> {
        self.pool.submit(|reply| CacheTask::Download(request, reply))
    }

    /// Measures the duration of a downloaded file, if a probe is available.
    pub fn probe(&self, path: impl Into<PathBuf>) -> Pending<Option<u64>> {
        let path = path.into();
        self.pool.submit(|reply| CacheTask::Probe(path, reply))
    }
}
