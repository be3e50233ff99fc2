// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Relational-database backend (placeholder).
//!
//! Every operation fails with `Unimplemented` until the schema and client
//! land; the contract forbids silent no-ops. The intended mapping stores
//! one row per logical file keyed by its path, which makes two contract
//! obligations straightforward:
//!
//! - name uniqueness comes from a unique constraint on the path column;
//! - `rename` of a directory is an `UPDATE` of the path prefix inside a
//!   transaction, which is all-or-nothing by construction.

use std::path::Path;

use super::backend::{DirEntry, StorageBackend, StorageError, StorageResult};

/// Relational-database backed storage (not yet implemented).
#[derive(Debug, Default)]
pub struct RelationalBackend;

impl RelationalBackend {
    pub fn new() -> Self {
        Self
    }
}

const UNIMPLEMENTED: StorageResult<()> = Err(StorageError::Unimplemented("relational backend"));

impl StorageBackend for RelationalBackend {
    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn create(&self, _path: &Path) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn create_dir(&self, _path: &Path, _recursive: bool) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn write(&self, _path: &Path, _data: &[u8]) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn read(&self, _path: &Path) -> StorageResult<Vec<u8>> {
        Err(StorageError::Unimplemented("relational backend"))
    }

    fn delete(&self, _path: &Path) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn delete_dir(&self, _path: &Path) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn rename(&self, _path: &Path, _destination: &Path) -> StorageResult<()> {
        UNIMPLEMENTED
    }

    fn list(&self, _path: &Path) -> StorageResult<Vec<DirEntry>> {
        Err(StorageError::Unimplemented("relational backend"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_fails_loudly() {
        let backend = RelationalBackend::new();
        let path = Path::new("accounts/alice");

        assert!(matches!(
            backend.create(path),
            Err(StorageError::Unimplemented(_))
        ));
        assert!(matches!(
            backend.read(path),
            Err(StorageError::Unimplemented(_))
        ));
        assert!(matches!(
            backend.rename(path, Path::new("dest")),
            Err(StorageError::Unimplemented(_))
        ));
    }
}
