// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

use std::env;
use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use vaulter_server::api::router;
use vaulter_server::config::Config;
use vaulter_server::state::AppState;
use vaulter_server::storage::{build_backend, initialize_roots, VaultPaths};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(backend = %config.backend, "starting Vaulter");

    let backend = build_backend(config.backend);
    let paths = VaultPaths::new(&config.tmp_root, &config.upload_root);
    if let Err(e) = initialize_roots(backend.as_ref(), &paths) {
        // Placeholder backends cannot create roots yet; keep serving so
        // their requests fail with a proper 501 instead of dying here.
        tracing::warn!(error = %e, "storage roots not initialized");
    }

    let state = AppState::new(backend, paths);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Vaulter server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
