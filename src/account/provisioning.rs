// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Two-phase account provisioning: pending → confirmed.
//!
//! `begin_create` uploads a vault blob into a pending directory under
//! `tmp_root` and issues the OTP secret; `confirm_create` verifies a code
//! from the enrolled authenticator and promotes the account by renaming
//! its whole directory into `upload_root`. A failed confirmation leaves
//! the account pending and retryable.

use std::sync::Arc;

use crate::account::locks::NameLocks;
use crate::account::name;
use crate::account::{find_key_secret, VaultError};
use crate::storage::{StorageBackend, VaultPaths};
use crate::totp;

/// Result of a successful `begin_create`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Account name derived from the uploaded file-name stem.
    pub name: String,
    /// Base32 OTP secret (also embedded in `otp_url`).
    pub secret: String,
    /// `otpauth://` URI for the client to render as a QR code.
    pub otp_url: String,
}

/// Account provisioning service.
///
/// Holds the backend instance injected at startup; no global state.
pub struct ProvisioningService {
    backend: Arc<dyn StorageBackend>,
    paths: VaultPaths,
    locks: NameLocks,
}

impl ProvisioningService {
    pub fn new(backend: Arc<dyn StorageBackend>, paths: VaultPaths) -> Self {
        Self {
            backend,
            paths,
            locks: NameLocks::new(),
        }
    }

    /// First phase: store the uploaded blob as a pending account and issue
    /// the OTP enrollment material.
    ///
    /// Fails with `AlreadyExists` when the derived name is taken in either
    /// root. The per-name lock spans the check and the creation, so two
    /// concurrent uploads of the same name cannot both pass the check.
    pub fn begin_create(&self, file_name: &str, blob: &[u8]) -> Result<NewAccount, VaultError> {
        let account = name::account_name_from_file(file_name)?;

        let _guard = self.locks.lock(&account);

        let pending_dir = self.paths.pending_dir(&account);
        if self.backend.exists(&pending_dir) || self.backend.exists(&self.paths.confirmed_dir(&account))
        {
            return Err(VaultError::AlreadyExists(account));
        }

        let secret =
            totp::generate_secret().map_err(|e| VaultError::Internal(e.to_string()))?;

        self.backend.create_dir(&pending_dir, true)?;
        self.backend
            .write(&self.paths.blob_file(&pending_dir, &account), blob)?;
        self.backend
            .create(&self.paths.key_marker(&pending_dir, &secret))?;

        let otp_url = totp::provisioning_uri(&secret, &account);
        tracing::info!(account = %account, "pending account created");

        Ok(NewAccount {
            name: account,
            secret,
            otp_url,
        })
    }

    /// Second phase: verify the submitted code and promote the pending
    /// account to confirmed.
    ///
    /// The per-name lock serializes concurrent confirmations; after one
    /// wins, the loser finds no pending directory and gets `NotFound`.
    pub fn confirm_create(&self, account: &str, otp_code: &str) -> Result<(), VaultError> {
        if !name::is_safe_account_name(account) {
            return Err(VaultError::NotFound(account.to_string()));
        }

        let _guard = self.locks.lock(account);

        let pending_dir = self.paths.pending_dir(account);
        if !self.backend.exists(&pending_dir) {
            tracing::error!(account = %account, "confirmation for unknown pending account");
            return Err(VaultError::NotFound(account.to_string()));
        }

        let secret = find_key_secret(self.backend.as_ref(), &pending_dir, account)?;

        let valid = totp::verify(&secret, otp_code).map_err(|e| {
            tracing::error!(account = %account, error = %e, "stored OTP secret unusable");
            VaultError::NotFound(account.to_string())
        })?;
        if !valid {
            tracing::error!(account = %account, "invalid OTP code during confirmation");
            return Err(VaultError::InvalidCode);
        }

        self.backend
            .rename(&pending_dir, &self.paths.confirmed_dir(account))?;
        tracing::info!(account = %account, "account confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalBackend, StorageError};
    use std::env;
    use std::fs;

    fn test_service() -> (ProvisioningService, VaultPaths) {
        let root = env::temp_dir().join(format!("test-provision-{}", uuid::Uuid::new_v4()));
        let paths = VaultPaths::new(root.join("tmp"), root.join("upload"));
        let backend: Arc<dyn StorageBackend> = Arc::new(LocalBackend::new());
        crate::storage::initialize_roots(backend.as_ref(), &paths).expect("init roots");
        (
            ProvisioningService::new(backend, paths.clone()),
            paths,
        )
    }

    fn cleanup(paths: &VaultPaths) {
        if let Some(root) = paths.tmp_root().parent() {
            let _ = fs::remove_dir_all(root);
        }
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs()
    }

    #[test]
    fn begin_create_lays_out_pending_account() {
        let (service, paths) = test_service();

        let new = service.begin_create("alice.vault", b"enc1").unwrap();
        assert_eq!(new.name, "alice");
        assert!(new.otp_url.starts_with("otpauth://totp/Vaulter:alice?"));
        assert!(new.otp_url.contains(&new.secret));

        let pending = paths.pending_dir("alice");
        assert_eq!(fs::read(paths.blob_file(&pending, "alice")).unwrap(), b"enc1");
        assert!(paths.key_marker(&pending, &new.secret).exists());

        cleanup(&paths);
    }

    #[test]
    fn duplicate_name_is_rejected_while_pending() {
        let (service, paths) = test_service();

        service.begin_create("alice.vault", b"x").unwrap();
        let result = service.begin_create("alice.vault", b"y");

        assert!(matches!(result, Err(VaultError::AlreadyExists(_))));

        cleanup(&paths);
    }

    #[test]
    fn duplicate_name_is_rejected_after_confirmation() {
        let (service, paths) = test_service();

        let new = service.begin_create("alice.vault", b"x").unwrap();
        let code = crate::totp::code_at(&new.secret, now()).unwrap();
        service.confirm_create("alice", &code).unwrap();

        let result = service.begin_create("alice.vault", b"y");
        assert!(matches!(result, Err(VaultError::AlreadyExists(_))));

        cleanup(&paths);
    }

    #[test]
    fn bad_extension_is_rejected_before_any_side_effect() {
        let (service, paths) = test_service();

        let result = service.begin_create("alice.txt", b"x");
        assert!(matches!(result, Err(VaultError::InvalidFileName)));
        assert!(!paths.pending_dir("alice").exists());

        cleanup(&paths);
    }

    #[test]
    fn confirm_moves_directory_between_roots() {
        let (service, paths) = test_service();

        let new = service.begin_create("alice.vault", b"enc1").unwrap();
        let code = crate::totp::code_at(&new.secret, now()).unwrap();
        service.confirm_create("alice", &code).unwrap();

        assert!(!paths.pending_dir("alice").exists());
        let confirmed = paths.confirmed_dir("alice");
        assert_eq!(
            fs::read(paths.blob_file(&confirmed, "alice")).unwrap(),
            b"enc1"
        );
        assert!(paths.key_marker(&confirmed, &new.secret).exists());

        cleanup(&paths);
    }

    #[test]
    fn invalid_code_leaves_account_pending_and_retryable() {
        let (service, paths) = test_service();

        let new = service.begin_create("alice.vault", b"enc1").unwrap();

        let result = service.confirm_create("alice", "000000");
        // An all-zero code has a one-in-a-million chance of being valid;
        // accept either outcome but never a different error kind.
        if let Err(err) = result {
            assert!(matches!(err, VaultError::InvalidCode));
            assert!(paths.pending_dir("alice").exists());

            // Retry with a real code succeeds.
            let code = crate::totp::code_at(&new.secret, now()).unwrap();
            service.confirm_create("alice", &code).unwrap();
        }
        assert!(paths.confirmed_dir("alice").exists());

        cleanup(&paths);
    }

    #[test]
    fn confirm_unknown_account_is_not_found() {
        let (service, paths) = test_service();

        let result = service.confirm_create("nobody", "123456");
        assert!(matches!(result, Err(VaultError::NotFound(_))));

        cleanup(&paths);
    }

    #[test]
    fn confirm_rejects_unsafe_account_names() {
        let (service, paths) = test_service();

        let result = service.confirm_create("../alice", "123456");
        assert!(matches!(result, Err(VaultError::NotFound(_))));

        cleanup(&paths);
    }

    #[test]
    fn missing_key_marker_is_not_found() {
        let (service, paths) = test_service();

        let new = service.begin_create("alice.vault", b"enc1").unwrap();
        fs::remove_file(paths.key_marker(&paths.pending_dir("alice"), &new.secret)).unwrap();

        let result = service.confirm_create("alice", "123456");
        assert!(matches!(result, Err(VaultError::NotFound(_))));

        cleanup(&paths);
    }

    #[test]
    fn unimplemented_backend_surfaces_as_storage_error() {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(crate::storage::ObjectStoreBackend::new());
        let paths = VaultPaths::new("tmp", "upload");
        let service = ProvisioningService::new(backend, paths);

        let result = service.begin_create("alice.vault", b"x");
        assert!(matches!(
            result,
            Err(VaultError::Storage(StorageError::Unimplemented(_)))
        ));
    }
}
