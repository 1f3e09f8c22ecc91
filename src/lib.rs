// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitMotion: weekly workout tracking
//!
//! This crate provides the backend API for logging sets against templated
//! training weeks, archiving finished weeks and summarizing progress.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{CredentialHasher, TemplateCatalog};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub templates: TemplateCatalog,
    pub hasher: CredentialHasher,
}
