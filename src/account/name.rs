// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Account-name derivation and file-name sanitization.
//!
//! Uploaded file names come straight from the client and end up as path
//! segments, so they are normalized and reduced to a safe character set
//! before anything touches storage. Account names submitted on later
//! requests (confirm, login, update) must already be in sanitized form;
//! anything else is rejected before a path is built from it.

use unicode_normalization::UnicodeNormalization;

use crate::account::VaultError;
use crate::storage::VAULT_EXT;

/// Upload extensions accepted by `begin_create`.
pub const ALLOWED_EXTENSIONS: &[&str] = &[VAULT_EXT];

/// Reduce a client-supplied file name to a safe path segment.
///
/// NFKD-normalizes, drops non-ASCII, maps whitespace to `_`, keeps only
/// `[A-Za-z0-9._-]`, and trims leading/trailing dots and underscores so
/// the result can never be a hidden file or a relative-path component.
/// Returns `None` when nothing safe remains.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let mut sanitized = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        if ch.is_whitespace() {
            sanitized.push('_');
        } else if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            sanitized.push(ch);
        }
        // Everything else (path separators included) is dropped.
    }

    let trimmed = sanitized.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Whether `name` is acceptable as an account name on incoming requests.
///
/// An account name is safe when sanitization is a no-op on it and it
/// carries no extension dot tricks that could escape its directory.
pub fn is_safe_account_name(name: &str) -> bool {
    !name.is_empty() && sanitize_file_name(name).as_deref() == Some(name)
}

/// Derive the account name from an uploaded file name.
///
/// Validates the extension against [`ALLOWED_EXTENSIONS`] and returns the
/// file-name stem (everything before the last dot).
pub fn account_name_from_file(raw_file_name: &str) -> Result<String, VaultError> {
    let file_name = sanitize_file_name(raw_file_name).ok_or(VaultError::InvalidFileName)?;

    let (stem, extension) = file_name
        .rsplit_once('.')
        .ok_or(VaultError::InvalidFileName)?;
    if stem.is_empty() || !ALLOWED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()) {
        return Err(VaultError::InvalidFileName);
    }

    Ok(stem.to_string())
}
