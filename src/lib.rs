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

//! # Remote music catalog cache.
//!
//! A local mirror of a remote music library, with search over the mirror and
//! retrying downloads of the audio itself.
//!
//! The crate is built around a few components:
//!
//! * The **Track Store** ([`TrackStore`]) keeps the catalog in one SQLite
//!   table that is replaced wholesale on each refresh.
//! * The **Catalog Sync** ([`CatalogSync`]) pulls the full remote listing and
//!   replaces the catalog, unless the listing came back empty.
//! * The **Downloader** ([`Downloader`]) fetches track audio with bounded
//!   retry and writes it atomically into a flat cache directory.
//! * The **Duration Prober** ([`DurationProber`]) asks an external tool how
//!   long a downloaded file is, when such a tool is installed.
//! * The **Library** ([`Library`]) ties these together behind non-blocking
//!   operations that run on a small worker pool.
//!
//! ## Collaborators
//!
//! The music service and the playback layer are supplied by the host through
//! the [`RemoteClient`] and [`PlaybackSink`] traits. The crate emits
//! `tracing` events but leaves installing a subscriber to the host.

mod auth;
mod config;
mod db;
mod download;
mod error;
mod library;
mod model;
mod player;
mod probe;
mod remote;
mod sync;
mod tasks;

pub use crate::{
    auth::{AuthState, BootstrapOutcome, bootstrap_credential},
    config::{
        CacheConfig, MIN_WORKERS, load_config, load_config_from, save_config, save_config_to,
    },
    db::TrackStore,
    download::Downloader,
    error::{CacheError, StoreError},
    library::Library,
    model::{DownloadOutcome, DownloadRequest, TrackMeta, TrackRecord, remote_id_from_key},
    player::{ChannelSink, PlaybackRequest, PlaybackSink},
    probe::{DEFAULT_PROBE_BINARY, DurationProber, ProbeError},
    remote::{CredentialAuthorizer, RemoteClient, RemoteError, RemoteTrack},
    sync::CatalogSync,
    tasks::Pending,
};
