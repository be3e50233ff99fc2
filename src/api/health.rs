// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Pending-accounts root availability.
    pub tmp_root: String,
    /// Confirmed-accounts root availability.
    pub upload_root: String,
}

/// Health check endpoint handler.
///
/// Returns 200 if both storage roots are reachable, 503 otherwise.
#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let check = |ok: bool| if ok { "ok" } else { "missing" }.to_string();
    let tmp_ok = state.backend.exists(state.paths.tmp_root());
    let upload_ok = state.backend.exists(state.paths.upload_root());
    let all_ok = tmp_ok && upload_ok;

    let response = HealthResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            tmp_root: check(tmp_ok),
            upload_root: check(upload_ok),
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalBackend, VaultPaths};
    use std::sync::Arc;

    #[tokio::test]
    async fn healthy_when_both_roots_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = VaultPaths::new(dir.path().join("tmp"), dir.path().join("upload"));
        let backend: Arc<dyn crate::storage::StorageBackend> = Arc::new(LocalBackend::new());
        crate::storage::initialize_roots(backend.as_ref(), &paths).unwrap();

        let (status, Json(body)) = health(State(AppState::new(backend, paths))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn degraded_when_roots_are_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = VaultPaths::new(dir.path().join("tmp"), dir.path().join("upload"));
        let backend: Arc<dyn crate::storage::StorageBackend> = Arc::new(LocalBackend::new());
        // Roots deliberately not initialized.

        let (status, Json(body)) = health(State(AppState::new(backend, paths))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.tmp_root, "missing");
    }
}
