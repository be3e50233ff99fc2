// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! # Storage Module
//!
//! Pluggable storage for vault blobs and OTP markers. One backend instance
//! is built at startup from the configured [`BackendKind`] and injected
//! into the provisioning and session services; business logic only ever
//! sees the [`StorageBackend`] trait.
//!
//! ## Storage Layout
//!
//! ```text
//! {tmp_root}/                 # pending accounts
//!   {account}/
//!     {account}.vault         # opaque, client-side-encrypted blob
//!     {secret}.key            # empty marker; secret encoded in the name
//! {upload_root}/              # confirmed accounts, same shape
//!   {account}/
//!     {account}.vault
//!     {secret}.key
//! ```
//!
//! An account name is unique across the union of both roots. Confirmation
//! renames the whole account directory from `tmp_root` to `upload_root`;
//! on the local backend that rename is atomic as long as both roots share
//! a filesystem.

pub mod backend;
pub mod local;
pub mod object_store;
pub mod paths;
pub mod relational;

pub use backend::{
    build_backend, BackendKind, DirEntry, StorageBackend, StorageError, StorageResult,
};
pub use local::LocalBackend;
pub use object_store::ObjectStoreBackend;
pub use paths::{VaultPaths, DEFAULT_TMP_ROOT, DEFAULT_UPLOAD_ROOT, KEY_EXT, VAULT_EXT};
pub use relational::RelationalBackend;

/// Create both storage roots. Called once at startup; idempotent.
pub fn initialize_roots(backend: &dyn StorageBackend, paths: &VaultPaths) -> StorageResult<()> {
    backend.create_dir(paths.tmp_root(), true)?;
    backend.create_dir(paths.upload_root(), true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_roots_creates_both_roots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = VaultPaths::new(dir.path().join("tmp"), dir.path().join("upload"));
        let backend = LocalBackend::new();

        initialize_roots(&backend, &paths).unwrap();
        assert!(backend.exists(paths.tmp_root()));
        assert!(backend.exists(paths.upload_root()));

        // Safe to call again.
        initialize_roots(&backend, &paths).unwrap();
    }
}
