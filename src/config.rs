// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is
//! read-only afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `VAULTER_BACKEND` | Storage backend kind (`local`, `object-store`, `relational`) | `local` |
//! | `VAULTER_TMP_ROOT` | Root for pending accounts | `tmp_vault_storage` |
//! | `VAULTER_UPLOAD_ROOT` | Root for confirmed accounts | `vault_storage` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use crate::storage::{BackendKind, DEFAULT_TMP_ROOT, DEFAULT_UPLOAD_ROOT};

/// Environment variable selecting the storage backend kind.
pub const BACKEND_ENV: &str = "VAULTER_BACKEND";

/// Environment variable for the pending-accounts root.
pub const TMP_ROOT_ENV: &str = "VAULTER_TMP_ROOT";

/// Environment variable for the confirmed-accounts root.
pub const UPLOAD_ROOT_ENV: &str = "VAULTER_UPLOAD_ROOT";

/// Maximum accepted request body size (vault blobs are small).
pub const MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Startup configuration, immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub tmp_root: PathBuf,
    pub upload_root: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load the configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match env::var(BACKEND_ENV) {
            Ok(raw) => raw
                .parse::<BackendKind>()
                .map_err(|reason| ConfigError::Invalid {
                    var: BACKEND_ENV,
                    reason,
                })?,
            Err(_) => BackendKind::Local,
        };

        let tmp_root =
            PathBuf::from(env::var(TMP_ROOT_ENV).unwrap_or_else(|_| DEFAULT_TMP_ROOT.to_string()));
        let upload_root = PathBuf::from(
            env::var(UPLOAD_ROOT_ENV).unwrap_or_else(|_| DEFAULT_UPLOAD_ROOT.to_string()),
        );

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            backend,
            tmp_root,
            upload_root,
            host,
            port,
        })
    }
}
