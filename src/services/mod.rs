// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod dedup;
pub mod progress;
pub mod templates;

pub use credentials::{hash_password, verify_password, CredentialError, CredentialHasher};
pub use dedup::dedupe_weeks;
pub use progress::build_progress;
pub use templates::TemplateCatalog;
