// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Domain errors for account provisioning and authentication.
//!
//! Business outcomes are values, not exceptions: every operation returns
//! one of these kinds and the HTTP layer maps them to status codes. The
//! `Display` impl carries full detail for server logs; what a client sees
//! is the separate [`client_message`](VaultError::client_message), which
//! stays generic for internal failures.

use axum::http::StatusCode;

use crate::storage::StorageError;

/// Error kinds for account operations.
#[derive(Debug)]
pub enum VaultError {
    /// Account name collides with a pending or confirmed account.
    AlreadyExists(String),
    /// Account directory, `.key` marker, or blob file is missing. Also
    /// covers corrupt account state (e.g. multiple markers), which must
    /// not be distinguishable to a client.
    NotFound(String),
    /// OTP verification failed; the account state is unchanged.
    InvalidCode,
    /// Uploaded file name failed sanitization or the extension allow-list.
    InvalidFileName,
    /// Backend I/O failure.
    Storage(StorageError),
    /// Non-storage internal failure (e.g. the system RNG).
    Internal(String),
}

impl VaultError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::AlreadyExists(_) => StatusCode::CONFLICT,
            VaultError::NotFound(_) => StatusCode::NOT_FOUND,
            VaultError::InvalidCode | VaultError::InvalidFileName => StatusCode::BAD_REQUEST,
            VaultError::Storage(StorageError::Unimplemented(_)) => StatusCode::NOT_IMPLEMENTED,
            VaultError::Storage(_) | VaultError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic, non-leaking message for the client response body.
    pub fn client_message(&self) -> &'static str {
        match self {
            VaultError::AlreadyExists(_) => "Account name already exists",
            VaultError::NotFound(_) => "Account does not exist",
            VaultError::InvalidCode => "Invalid OTP code",
            VaultError::InvalidFileName => "File not accepted",
            VaultError::Storage(StorageError::Unimplemented(_)) => "Backend not available",
            VaultError::Storage(_) | VaultError::Internal(_) => "An internal error occurred",
        }
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultError::AlreadyExists(name) => write!(f, "account already exists: {name}"),
            VaultError::NotFound(what) => write!(f, "not found: {what}"),
            VaultError::InvalidCode => write!(f, "invalid OTP code"),
            VaultError::InvalidFileName => write!(f, "file name rejected by sanitization"),
            VaultError::Storage(e) => write!(f, "storage failure: {e}"),
            VaultError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for VaultError {
    fn from(e: StorageError) -> Self {
        VaultError::Storage(e)
    }
}
