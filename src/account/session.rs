// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! OTP-gated access to confirmed accounts.
//!
//! Both operations run the same gate, in a fixed order: the confirmed
//! account directory must exist, the directory must hold exactly one
//! `.key` marker, and only then is the submitted code verified. Existence
//! failures therefore never surface as `InvalidCode` and vice versa.

use std::path::PathBuf;
use std::sync::Arc;

use crate::account::name;
use crate::account::{find_key_secret, VaultError};
use crate::storage::{StorageBackend, VaultPaths};
use crate::totp;

/// Login/update service over confirmed accounts.
pub struct SessionService {
    backend: Arc<dyn StorageBackend>,
    paths: VaultPaths,
}

impl SessionService {
    pub fn new(backend: Arc<dyn StorageBackend>, paths: VaultPaths) -> Self {
        Self { backend, paths }
    }

    /// Return the stored vault blob, unchanged. The server never
    /// interprets the bytes; decryption happens client-side.
    pub fn login(&self, account: &str, otp_code: &str) -> Result<Vec<u8>, VaultError> {
        let account_dir = self.gate(account, otp_code)?;
        let blob = self
            .backend
            .read(&self.paths.blob_file(&account_dir, account))
            .map_err(|e| match e {
                // A gate-passing account without its blob is corrupt state.
                crate::storage::StorageError::NotFound(_) => {
                    tracing::error!(account = %account, "account directory has no vault blob");
                    VaultError::NotFound(account.to_string())
                }
                other => VaultError::Storage(other),
            })?;
        tracing::info!(account = %account, "vault blob served");
        Ok(blob)
    }

    /// Overwrite the stored vault blob in place. The previous content is
    /// not retained.
    pub fn update(&self, account: &str, otp_code: &str, blob: &[u8]) -> Result<(), VaultError> {
        let account_dir = self.gate(account, otp_code)?;
        self.backend
            .write(&self.paths.blob_file(&account_dir, account), blob)?;
        tracing::info!(account = %account, "vault blob updated");
        Ok(())
    }

    /// Shared OTP gate. Check order is load-bearing: existence before
    /// marker, marker before code.
    fn gate(&self, account: &str, otp_code: &str) -> Result<PathBuf, VaultError> {
        if !name::is_safe_account_name(account) {
            return Err(VaultError::NotFound(account.to_string()));
        }

        let account_dir = self.paths.confirmed_dir(account);
        if !self.backend.exists(&account_dir) {
            tracing::error!(account = %account, "access to non-existing account");
            return Err(VaultError::NotFound(account.to_string()));
        }

        let secret = find_key_secret(self.backend.as_ref(), &account_dir, account)?;

        let valid = totp::verify(&secret, otp_code).map_err(|e| {
            tracing::error!(account = %account, error = %e, "stored OTP secret unusable");
            VaultError::NotFound(account.to_string())
        })?;
        if !valid {
            tracing::error!(account = %account, "invalid OTP code");
            return Err(VaultError::InvalidCode);
        }

        Ok(account_dir)
    }
}
