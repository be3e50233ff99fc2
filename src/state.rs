// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

use std::sync::Arc;

use crate::account::{ProvisioningService, SessionService};
use crate::storage::{StorageBackend, VaultPaths};

/// Shared application state.
///
/// Built once at startup from the configured backend; everything in here
/// is read-only after construction (the services keep their own interior
/// locking where they need it).
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn StorageBackend>,
    pub paths: VaultPaths,
    pub provisioning: Arc<ProvisioningService>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(backend: Arc<dyn StorageBackend>, paths: VaultPaths) -> Self {
        let provisioning = Arc::new(ProvisioningService::new(
            Arc::clone(&backend),
            paths.clone(),
        ));
        let sessions = Arc::new(SessionService::new(Arc::clone(&backend), paths.clone()));
        Self {
            backend,
            paths,
            provisioning,
            sessions,
        }
    }
}
