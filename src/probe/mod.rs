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

//! Audio duration probing through an external tool.
//!
//! Durations are an optional enrichment. When no probe binary can be found
//! the prober still works, it just never knows a duration.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_PROBE_BINARY: &str = "ffprobe";

/// Arguments asking the probe for the container duration only, printed as a
/// bare number.
const PROBE_ARGS: &[&str] = &[
    "-v",
    "error",
    "-show_entries",
    "format=duration",
    "-of",
    "default=noprint_wrappers=1:nokey=1",
];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run {}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {status}", .binary.display())]
    Failed { binary: PathBuf, status: String },

    #[error("probe printed `{0}`, which is not a duration")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct DurationProber {
    binary: Option<PathBuf>,
}

impl DurationProber {
    /// Locates the probe binary once, up front.
    ///
    /// `name` is first tried as a path to an executable. Failing that, the
    /// directories on `PATH` are searched, honouring the platform's executable
    /// suffixes.
    pub fn discover(name: &str) -> Self {
        let binary = find_binary(name);

        match &binary {
            Some(path) => info!(path = %path.display(), "duration probe found"),
            None => info!(name, "no duration probe found, durations disabled"),
        }

        Self { binary }
    }

    /// A prober with no binary, which never reports a duration.
    pub fn disabled() -> Self {
        Self { binary: None }
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    /// Measures the duration of an audio file in whole seconds.
    ///
    /// Returns `None` when no probe is available, and also when the probe
    /// fails or prints something that is not a number.
    pub fn probe(&self, path: &Path) -> Option<u64> {
        match self.try_probe(path) {
            Ok(duration) => duration,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "duration probe failed");
                None
            }
        }
    }

    /// Like [`probe`](Self::probe) but reports probe failures.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if the probe cannot be started, exits with a
    /// failure status, or prints output that does not parse as a duration.
    pub fn try_probe(&self, path: &Path) -> Result<Option<u64>, ProbeError> {
        let Some(binary) = &self.binary else {
            return Ok(None);
        };

        let output = Command::new(binary)
            .args(PROBE_ARGS)
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                binary: binary.clone(),
                status: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let seconds = parse_duration(&stdout)?;

        debug!(path = %path.display(), seconds, "probed duration");

        Ok(Some(seconds))
    }
}

/// Parses probe output such as `"213.486000\n"` into whole seconds.
///
/// Fractions are truncated, never rounded.
pub(crate) fn parse_duration(output: &str) -> Result<u64, ProbeError> {
    let trimmed = output.trim();

    let seconds: f64 = trimmed
        .parse()
        .map_err(|_| ProbeError::Malformed(trimmed.to_string()))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ProbeError::Malformed(trimmed.to_string()));
    }

    Ok(seconds.trunc() as u64)
}

fn find_binary(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let direct = Path::new(name);
    if is_executable(direct) {
        return Some(direct.to_path_buf());
    }

    which::which(name).ok()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests;
