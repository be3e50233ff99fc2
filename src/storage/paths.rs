// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Path conventions for the two-root account layout.
//!
//! Pending accounts live under `tmp_root`, confirmed accounts under
//! `upload_root`. Each account occupies one directory holding exactly one
//! vault blob (`<name>.vault`) and one OTP marker (`<secret>.key`).
//! Confirmation is a single directory rename from one root to the other.

use std::path::{Path, PathBuf};

/// Extension of stored vault blobs.
pub const VAULT_EXT: &str = "vault";

/// Extension of the OTP secret marker file.
pub const KEY_EXT: &str = "key";

/// Default directory for pending (unconfirmed) accounts.
pub const DEFAULT_TMP_ROOT: &str = "tmp_vault_storage";

/// Default directory for confirmed accounts.
pub const DEFAULT_UPLOAD_ROOT: &str = "vault_storage";

/// Path composition for both storage roots.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    tmp_root: PathBuf,
    upload_root: PathBuf,
}

impl Default for VaultPaths {
    fn default() -> Self {
        Self::new(DEFAULT_TMP_ROOT, DEFAULT_UPLOAD_ROOT)
    }
}

impl VaultPaths {
    /// Create paths over custom roots (also used by tests).
    pub fn new(tmp_root: impl AsRef<Path>, upload_root: impl AsRef<Path>) -> Self {
        Self {
            tmp_root: tmp_root.as_ref().to_path_buf(),
            upload_root: upload_root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for pending accounts.
    pub fn tmp_root(&self) -> &Path {
        &self.tmp_root
    }

    /// Root directory for confirmed accounts.
    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    /// Directory of a pending account.
    pub fn pending_dir(&self, account: &str) -> PathBuf {
        self.tmp_root.join(account)
    }

    /// Directory of a confirmed account.
    pub fn confirmed_dir(&self, account: &str) -> PathBuf {
        self.upload_root.join(account)
    }

    /// Vault blob file inside an account directory.
    pub fn blob_file(&self, account_dir: &Path, account: &str) -> PathBuf {
        account_dir.join(format!("{account}.{VAULT_EXT}"))
    }

    /// OTP marker file inside an account directory. The secret is encoded
    /// in the file name; the file content stays empty.
    pub fn key_marker(&self, account_dir: &Path, secret: &str) -> PathBuf {
        account_dir.join(format!("{secret}.{KEY_EXT}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots_match_storage_convention() {
        let paths = VaultPaths::default();
        assert_eq!(paths.tmp_root(), Path::new("tmp_vault_storage"));
        assert_eq!(paths.upload_root(), Path::new("vault_storage"));
    }

    #[test]
    fn account_dirs_sit_under_their_roots() {
        let paths = VaultPaths::new("/srv/tmp", "/srv/vaults");
        assert_eq!(paths.pending_dir("alice"), PathBuf::from("/srv/tmp/alice"));
        assert_eq!(
            paths.confirmed_dir("alice"),
            PathBuf::from("/srv/vaults/alice")
        );
    }

    #[test]
    fn blob_and_marker_names_follow_convention() {
        let paths = VaultPaths::new("/srv/tmp", "/srv/vaults");
        let dir = paths.confirmed_dir("alice");

        assert_eq!(
            paths.blob_file(&dir, "alice"),
            PathBuf::from("/srv/vaults/alice/alice.vault")
        );
        assert_eq!(
            paths.key_marker(&dir, "JBSWY3DPEHPK3PXP"),
            PathBuf::from("/srv/vaults/alice/JBSWY3DPEHPK3PXP.key")
        );
    }
}
