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

//! Music-service login state and the one-time credential bootstrap.
//!
//! At runtime the cache logs in exactly once, when the façade is built. A
//! failed login is not retried; fixing it means running
//! [`bootstrap_credential`] (an interactive, operator-driven flow) and
//! restarting the host.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::remote::{CredentialAuthorizer, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn is_authenticated(self) -> bool {
        self == AuthState::Authenticated
    }
}

/// Logs `client` in, using the credential file only if it exists.
pub(crate) fn login(client: &dyn RemoteClient, credential_path: &Path) -> AuthState {
    let credential = credential_path.is_file().then_some(credential_path);

    if client.login(credential) {
        info!(credential = credential.is_some(), "logged in to music service");
        AuthState::Authenticated
    } else {
        warn!(
            credential = credential.is_some(),
            "login to music service failed, remote operations will not work"
        );
        AuthState::Unauthenticated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The stored credential already works.
    AlreadyAuthorized,
    /// A fresh credential was stored and works.
    Authorized,
    /// Authorization did not yield a working credential; try again later.
    Failed,
}

/// Makes sure a working credential is stored at `credential_path`.
///
/// An existing credential that logs in is kept. One that does not is deleted
/// and the interactive authorization runs to store a new one, which is then
/// verified by logging in again.
///
/// # Errors
///
/// Returns an error if the credential directory cannot be created or a
/// rejected credential cannot be removed.
pub fn bootstrap_credential(
    client: &dyn CredentialAuthorizer,
    credential_path: &Path,
) -> Result<BootstrapOutcome> {
    if let Some(dir) = credential_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    if credential_path.is_file() {
        if client.login(Some(credential_path)) {
            info!("stored credential is valid, no authorization needed");
            return Ok(BootstrapOutcome::AlreadyAuthorized);
        }

        warn!(path = %credential_path.display(), "stored credential rejected, removing it");
        fs::remove_file(credential_path)
            .with_context(|| format!("Failed to remove {}", credential_path.display()))?;
    }

    if let Err(e) = client.authorize(credential_path) {
        warn!(error = %e, "authorization failed");
        return Ok(BootstrapOutcome::Failed);
    }

    if client.login(Some(credential_path)) {
        info!("authorization complete, restart the host to pick it up");
        Ok(BootstrapOutcome::Authorized)
    } else {
        warn!("new credential was rejected");
        Ok(BootstrapOutcome::Failed)
    }
}
