// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! S3-compatible object-store backend (placeholder).
//!
//! Every operation fails with `Unimplemented` until the real client lands;
//! the contract forbids silent no-ops. Two things the implementation must
//! honor beyond plain key/value I/O:
//!
//! - `rename` has no atomic primitive on object stores. Directory moves
//!   need a journal entry written before the copy starts, a key-by-key
//!   copy, and a delete of the source once the copy is complete, so that
//!   a crash mid-move can be detected and resumed or rolled back.
//! - "Directories" are key prefixes; `exists` on a directory means
//!   "any key under this prefix".

use std::path::Path;

use super::backend::{DirEntry, StorageBackend, StorageError, StorageResult};

/// Object-store backed storage (not yet implemented).
#[derive(Debug, Default)]
pub struct ObjectStoreBackend;

impl ObjectStoreBackend {
    pub fn new() -> Self {
        Self
    }
}

const UNIMPLEMENTED: StorageResult<()> =
    Err(StorageError::Unimplemented("object-store backend"));

impl StorageBackend for ObjectStoreBackend {
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
        Err(StorageError::Unimplemented("object-store backend"))
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
        Err(StorageError::Unimplemented("object-store backend"))
    }
}
