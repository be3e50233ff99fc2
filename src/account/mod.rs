// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! # Account Module
//!
//! The account lifecycle has exactly two states: `Pending` (uploaded but
//! not yet confirmed, stored under `tmp_root`) and `Confirmed` (OTP
//! verified, stored under `upload_root`). The state is the location; no
//! separate state field exists. Modules:
//!
//! - `name` - account-name derivation and file-name sanitization
//! - `provisioning` - two-phase create/confirm state machine
//! - `session` - OTP-gated login and update over confirmed accounts
//! - `locks` - per-name locks closing check-then-act races
//! - `error` - the domain error taxonomy
//!
//! There is no delete operation and no pending-account expiry; both are
//! deliberate scope exclusions, recorded in DESIGN.md.

pub mod error;
pub mod locks;
pub mod name;
pub mod provisioning;
pub mod session;

pub use error::VaultError;
pub use provisioning::{NewAccount, ProvisioningService};
pub use session::SessionService;

use std::path::Path;

use crate::storage::{StorageBackend, StorageError, KEY_EXT};

/// Locate the single `.key` marker in an account directory and return the
/// secret encoded in its file-name stem.
///
/// No marker means the account is unusable; more than one means the
/// directory was tampered with or half-written. Both are corrupt states
/// and deliberately indistinguishable from a missing account to clients.
pub(crate) fn find_key_secret(
    backend: &dyn StorageBackend,
    account_dir: &Path,
    account: &str,
) -> Result<String, VaultError> {
    let entries = backend.list(account_dir).map_err(|e| match e {
        StorageError::NotFound(_) => VaultError::NotFound(account.to_string()),
        other => VaultError::Storage(other),
    })?;

    let suffix = format!(".{KEY_EXT}");
    let mut secrets: Vec<&str> = entries
        .iter()
        .filter_map(|entry| entry.name.strip_suffix(suffix.as_str()))
        .collect();

    match secrets.len() {
        1 => Ok(secrets.remove(0).to_string()),
        0 => {
            tracing::error!(account = %account, "account directory has no OTP key marker");
            Err(VaultError::NotFound(account.to_string()))
        }
        n => {
            tracing::error!(account = %account, markers = n, "account directory has multiple OTP key markers");
            Err(VaultError::NotFound(account.to_string()))
        }
    }
}
