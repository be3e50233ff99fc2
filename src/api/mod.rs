// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::MAX_CONTENT_LENGTH, state::AppState};

pub mod accounts;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/accounts", post(accounts::create_account))
        .route("/accounts/confirm", post(accounts::confirm_account))
        .route("/login", post(accounts::login))
        .route("/update", post(accounts::update))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_CONTENT_LENGTH))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::create_account,
        accounts::confirm_account,
        accounts::login,
        accounts::update,
        health::health
    ),
    components(
        schemas(
            accounts::NewAccountResponse,
            accounts::ConfirmRequest,
            accounts::LoginRequest,
            accounts::UpdateRequest,
            accounts::MessageResponse,
            health::HealthResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Accounts", description = "Vault account provisioning and access"),
        (name = "Health", description = "Liveness and storage checks")
    )
)]
struct ApiDoc;
