// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Account API endpoints: provisioning, confirmation, login, update.
//!
//! Thin shell over the account services. Request parsing and response
//! shaping happen here; every decision about accounts lives in
//! `crate::account`.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the uploaded vault file.
const VAULT_FILE_FIELD: &str = "vault_file";

/// Response after the first provisioning phase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewAccountResponse {
    /// Account name derived from the uploaded file name.
    pub account_name: String,
    /// `otpauth://` URI to render as a QR code for authenticator enrollment.
    pub otp_url: String,
}

/// Form body for the confirmation phase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    pub account_name: String,
    pub otp_code: String,
}

/// Form body for login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub account_name: String,
    pub otp_code: String,
}

/// Form body for a vault update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequest {
    pub account_name: String,
    pub otp_code: String,
    /// New vault content; stored verbatim, never interpreted.
    pub vault_file_content: String,
}

/// Generic confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// First provisioning phase: upload a vault file, get OTP enrollment data.
#[utoipa::path(
    post,
    path = "/v1/accounts",
    tag = "Accounts",
    request_body(content = Vec<u8>, content_type = "multipart/form-data",
        description = "Multipart body with a `vault_file` file field"),
    responses(
        (status = 201, description = "Pending account created", body = NewAccountResponse),
        (status = 400, description = "File rejected"),
        (status = 409, description = "Account name already exists")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<NewAccountResponse>), ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some(VAULT_FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("No vault file provided"))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        upload = Some((file_name, data));
    }

    let (file_name, data) =
        upload.ok_or_else(|| ApiError::bad_request("No vault file provided"))?;
    let new = state.provisioning.begin_create(&file_name, &data)?;

    Ok((
        StatusCode::CREATED,
        Json(NewAccountResponse {
            account_name: new.name,
            otp_url: new.otp_url,
        }),
    ))
}

/// Second provisioning phase: verify the OTP code, confirm the account.
#[utoipa::path(
    post,
    path = "/v1/accounts/confirm",
    tag = "Accounts",
    request_body(content = ConfirmRequest,
        content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account confirmed", body = MessageResponse),
        (status = 400, description = "Invalid OTP code"),
        (status = 404, description = "No such pending account")
    )
)]
pub async fn confirm_account(
    State(state): State<AppState>,
    Form(request): Form<ConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .provisioning
        .confirm_create(&request.account_name, &request.otp_code)?;
    Ok(Json(MessageResponse {
        message: format!(
            "Your account \"{}\" has been successfully created",
            request.account_name
        ),
    }))
}

/// Return the stored vault blob after OTP verification.
#[utoipa::path(
    post,
    path = "/v1/login",
    tag = "Accounts",
    request_body(content = LoginRequest,
        content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Vault blob", body = Vec<u8>,
            content_type = "application/octet-stream"),
        (status = 400, description = "Invalid OTP code"),
        (status = 404, description = "No such account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Response, ApiError> {
    let blob = state
        .sessions
        .login(&request.account_name, &request.otp_code)?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        blob,
    )
        .into_response())
}

/// Overwrite the stored vault blob after OTP verification.
#[utoipa::path(
    post,
    path = "/v1/update",
    tag = "Accounts",
    request_body(content = UpdateRequest,
        content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Vault updated", body = MessageResponse),
        (status = 400, description = "Invalid OTP code"),
        (status = 404, description = "No such account")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Form(request): Form<UpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.update(
        &request.account_name,
        &request.otp_code,
        request.vault_file_content.as_bytes(),
    )?;
    Ok(Json(MessageResponse {
        message: "Update done".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalBackend, VaultPaths};
    use std::env;
    use std::fs;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let root = env::temp_dir().join(format!("test-api-{}", uuid::Uuid::new_v4()));
        let paths = VaultPaths::new(root.join("tmp"), root.join("upload"));
        let backend: Arc<dyn crate::storage::StorageBackend> = Arc::new(LocalBackend::new());
        crate::storage::initialize_roots(backend.as_ref(), &paths).expect("init roots");
        AppState::new(backend, paths)
    }

    fn cleanup(state: &AppState) {
        if let Some(root) = state.paths.tmp_root().parent() {
            let _ = fs::remove_dir_all(root);
        }
    }

    fn current_code(secret: &str) -> String {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs();
        crate::totp::code_at(secret, now).expect("valid secret")
    }

    #[tokio::test]
    async fn confirm_then_login_through_handlers() {
        let state = test_state();
        let new = state
            .provisioning
            .begin_create("alice.vault", b"enc1")
            .unwrap();

        let Json(confirmed) = confirm_account(
            State(state.clone()),
            Form(ConfirmRequest {
                account_name: "alice".into(),
                otp_code: current_code(&new.secret),
            }),
        )
        .await
        .expect("confirmation succeeds");
        assert!(confirmed.message.contains("alice"));

        let response = login(
            State(state.clone()),
            Form(LoginRequest {
                account_name: "alice".into(),
                otp_code: current_code(&new.secret),
            }),
        )
        .await
        .expect("login succeeds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"enc1");

        cleanup(&state);
    }

    #[tokio::test]
    async fn login_unknown_account_is_404_not_400() {
        let state = test_state();

        let err = login(
            State(state.clone()),
            Form(LoginRequest {
                account_name: "nonexistent".into(),
                otp_code: "123456".into(),
            }),
        )
        .await
        .expect_err("must fail");
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        cleanup(&state);
    }

    #[tokio::test]
    async fn update_overwrites_blob() {
        let state = test_state();
        let new = state
            .provisioning
            .begin_create("alice.vault", b"enc1")
            .unwrap();
        state
            .provisioning
            .confirm_create("alice", &current_code(&new.secret))
            .unwrap();

        update(
            State(state.clone()),
            Form(UpdateRequest {
                account_name: "alice".into(),
                otp_code: current_code(&new.secret),
                vault_file_content: "enc2".into(),
            }),
        )
        .await
        .expect("update succeeds");

        let blob = state
            .sessions
            .login("alice", &current_code(&new.secret))
            .unwrap();
        assert_eq!(blob, b"enc2");

        cleanup(&state);
    }
}
