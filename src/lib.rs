// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Vaulter - OTP-Gated Vault Storage Service
//!
//! This crate stores opaque, client-side-encrypted vault blobs under
//! human-chosen account names. Accounts are provisioned in two phases
//! (upload, then TOTP confirmation) over a pluggable storage backend.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `account` - provisioning state machine and OTP-gated access
//! - `storage` - backend contract, local/object-store/relational backends
//! - `totp` - RFC 6238 second factor

pub mod account;
pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod totp;
