// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Local filesystem backend.
//!
//! The reference backend: every capability of the
//! [`StorageBackend`](super::StorageBackend) contract is implemented with
//! plain `std::fs` calls. `rename` relies on the rename syscall, which is
//! atomic as long as both roots live on the same filesystem; deployments
//! must not split `tmp_root` and `upload_root` across volumes.

use std::fs::{self, OpenOptions};
use std::path::Path;

use chrono::{DateTime, Utc};

use super::backend::{DirEntry, StorageBackend, StorageError, StorageResult};

/// Filesystem-backed storage.
#[derive(Debug, Default)]
pub struct LocalBackend;

impl LocalBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for LocalBackend {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // create_new is the exclusive-create primitive: an existing file is
        // never truncated, and concurrent creators race safely.
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(())
    }

    fn create_dir(&self, path: &Path, recursive: bool) -> StorageResult<()> {
        if recursive {
            fs::create_dir_all(path)?;
        } else {
            fs::create_dir(path)?;
        }
        Ok(())
    }

    fn write(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        Ok(fs::read(path)?)
    }

    fn delete(&self, path: &Path) -> StorageResult<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn delete_dir(&self, path: &Path) -> StorageResult<()> {
        fs::remove_dir_all(path)?;
        Ok(())
    }

    fn rename(&self, path: &Path, destination: &Path) -> StorageResult<()> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        if destination.exists() {
            return Err(StorageError::AlreadyExists(
                destination.display().to_string(),
            ));
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(path, destination)?;
        Ok(())
    }

    fn list(&self, path: &Path) -> StorageResult<Vec<DirEntry>> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                // Skip entries with non-UTF-8 names; we never create them.
                continue;
            };
            let metadata = entry.metadata()?;
            let modified: DateTime<Utc> = metadata.modified()?.into();
            entries.push(DirEntry {
                name,
                size: if metadata.is_file() { metadata.len() } else { 0 },
                modified,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
