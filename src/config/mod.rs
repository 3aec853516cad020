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

//! Cache configuration.
//!
//! This module manages the configuration file, which records where the
//! catalog, credential and audio cache live and how many workers run blocking
//! operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::probe::DEFAULT_PROBE_BINARY;

const CONFIG_NAME: &str = "trackcache";

const DATABASE_FILE: &str = "track.db";
const CREDENTIAL_FILE: &str = "credential";

pub const MIN_WORKERS: usize = 2;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub version: u32,
    /// Holds the catalog database and the credential file.
    pub config_dir: PathBuf,
    /// Flat directory that downloaded tracks are written to.
    pub cache_dir: PathBuf,
    /// Name or path of the duration probe executable.
    pub probe_binary: String,
    pub workers: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: 1,
            config_dir: PathBuf::from("config").join("gpm"),
            cache_dir: PathBuf::from("audio_cache"),
            probe_binary: DEFAULT_PROBE_BINARY.to_string(),
            workers: MIN_WORKERS,
        }
    }
}

impl CacheConfig {
    pub fn database_path(&self) -> PathBuf {
        self.config_dir.join(DATABASE_FILE)
    }

    pub fn credential_path(&self) -> PathBuf {
        self.config_dir.join(CREDENTIAL_FILE)
    }

    /// Number of pool workers, never fewer than [`MIN_WORKERS`].
    pub fn worker_count(&self) -> usize {
        self.workers.max(MIN_WORKERS)
    }
}

/// Loads the configuration from the platform config directory.
///
/// The library never calls this itself; hosts use it to build the
/// [`CacheConfig`] they pass to [`Library::new`](crate::Library::new). A
/// missing or unreadable file yields the defaults.
pub fn load_config() -> CacheConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &CacheConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Loads the configuration from an explicit file, falling back to the
/// defaults if it cannot be read.
pub fn load_config_from(path: &Path) -> CacheConfig {
    confy::load_path(path).unwrap_or_default()
}

pub fn save_config_to(path: &Path, cfg: &CacheConfig) -> Result<(), confy::ConfyError> {
    confy::store_path(path, cfg)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::{CacheConfig, load_config_from, save_config_to};

    #[test]
    fn derived_paths_live_in_config_dir() {
        let config = CacheConfig {
            config_dir: PathBuf::from("/srv/bot/config/gpm"),
            ..CacheConfig::default()
        };

        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/bot/config/gpm/track.db")
        );
        assert_eq!(
            config.credential_path(),
            PathBuf::from("/srv/bot/config/gpm/credential")
        );
    }

    #[test]
    fn worker_count_is_at_least_two() {
        let config = CacheConfig {
            workers: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.worker_count(), 2);

        let config = CacheConfig {
            workers: 6,
            ..CacheConfig::default()
        };
        assert_eq!(config.worker_count(), 6);
    }

    #[test]
    fn saved_config_is_loaded_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trackcache.toml");
        let config = CacheConfig {
            cache_dir: PathBuf::from("/var/cache/bot"),
            probe_binary: "/opt/ffmpeg/bin/ffprobe".to_string(),
            workers: 4,
            ..CacheConfig::default()
        };

        save_config_to(&path, &config).unwrap();

        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trackcache.toml");
        fs::write(&path, "workers = \"many\"").unwrap();

        assert_eq!(load_config_from(&path), CacheConfig::default());
    }
}
