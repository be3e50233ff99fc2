// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Storage backend contract shared by all backend implementations.
//!
//! Backends expose a uniform, byte/path-oriented capability set. Callers
//! compose logical paths with [`VaultPaths`](super::VaultPaths) and hand
//! them to whichever backend was selected at startup; the business logic
//! never branches on the backend kind.

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::local::LocalBackend;
use super::object_store::ObjectStoreBackend;
use super::relational::RelationalBackend;

/// Error type for storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during backend operations
    Io(io::Error),
    /// Entry not found
    NotFound(String),
    /// Entry already exists
    AlreadyExists(String),
    /// Backend capability not yet provided
    Unimplemented(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::NotFound(entry) => write!(f, "Not found: {entry}"),
            StorageError::AlreadyExists(entry) => write!(f, "Already exists: {entry}"),
            StorageError::Unimplemented(what) => {
                write!(f, "Backend operation not implemented: {what}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(e.to_string()),
            _ => StorageError::Io(e),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Descriptor for a single directory entry returned by [`StorageBackend::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name (final path segment).
    pub name: String,
    /// Size in bytes (0 for directories on backends without a meaningful size).
    pub size: u64,
    /// Last-modified timestamp.
    pub modified: DateTime<Utc>,
}

/// Uniform capability set every storage backend must provide.
///
/// All paths are logical paths composed by the caller; a backend maps them
/// onto its own namespace (filesystem paths, object keys, table rows).
///
/// ## Move contract
///
/// `rename` on a directory must make the source and destination states
/// mutually exclusive: either the old location is entirely gone and the new
/// one entirely present, or the call reports an error and neither location
/// observably changed. The local filesystem gets this from the rename
/// syscall; a backend without an atomic rename primitive must implement a
/// journaled copy-then-delete so a crash mid-move can be detected and
/// resumed or rolled back.
pub trait StorageBackend: Send + Sync {
    /// Whether an entry exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create an empty file at `path`, creating parent directories as needed.
    ///
    /// Fails with `AlreadyExists` if the path is already occupied; existing
    /// content is never silently destroyed.
    fn create(&self, path: &Path) -> StorageResult<()>;

    /// Create a directory, optionally with all missing parents.
    fn create_dir(&self, path: &Path, recursive: bool) -> StorageResult<()>;

    /// Overwrite the file at `path` with `data`.
    fn write(&self, path: &Path, data: &[u8]) -> StorageResult<()>;

    /// Read the full content of the file at `path`.
    fn read(&self, path: &Path) -> StorageResult<Vec<u8>>;

    /// Delete the file at `path`.
    fn delete(&self, path: &Path) -> StorageResult<()>;

    /// Delete the directory at `path` and all its contents.
    fn delete_dir(&self, path: &Path) -> StorageResult<()>;

    /// Relocate a file or directory, all-or-nothing (see trait docs).
    fn rename(&self, path: &Path, destination: &Path) -> StorageResult<()>;

    /// List the entries directly under `path`.
    fn list(&self, path: &Path) -> StorageResult<Vec<DirEntry>>;
}

/// Closed set of backend kinds selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Local filesystem (fully implemented).
    Local,
    /// S3-compatible object store (placeholder).
    ObjectStore,
    /// Relational database (placeholder).
    Relational,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Local => "local",
            BackendKind::ObjectStore => "object-store",
            BackendKind::Relational => "relational",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(BackendKind::Local),
            "object-store" => Ok(BackendKind::ObjectStore),
            "relational" => Ok(BackendKind::Relational),
            other => Err(format!(
                "unknown backend kind '{other}' (expected local, object-store or relational)"
            )),
        }
    }
}

/// Build the backend instance for the configured kind.
///
/// Called once at startup; the returned instance is passed explicitly to
/// every component that needs storage.
pub fn build_backend(kind: BackendKind) -> Arc<dyn StorageBackend> {
    match kind {
        BackendKind::Local => Arc::new(LocalBackend::new()),
        BackendKind::ObjectStore => Arc::new(ObjectStoreBackend::new()),
        BackendKind::Relational => Arc::new(RelationalBackend::new()),
    }
}
