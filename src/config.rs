// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Cloud Run injects secrets as environment variables, so everything is
//! read once at startup.

use std::env;

use crate::services::credentials::DEFAULT_ITERATIONS;

/// Lowest PBKDF2 iteration count accepted from the environment.
pub const MIN_PASSWORD_ITERATIONS: u32 = 100_000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Path to the week template catalog
    pub templates_path: String,
    /// PBKDF2 iterations for newly hashed passwords
    pub password_iterations: u32,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            templates_path: "data/week_templates.json".to_string(),
            // Keeps tests fast; production values come from `from_env`.
            password_iterations: 1_000,
            secure_cookies: false,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let password_iterations = match env::var("PASSWORD_ITERATIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("PASSWORD_ITERATIONS", raw.clone()))?,
            Err(_) => DEFAULT_ITERATIONS,
        };
        if password_iterations < MIN_PASSWORD_ITERATIONS {
            return Err(ConfigError::Invalid(
                "PASSWORD_ITERATIONS",
                password_iterations.to_string(),
            ));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            templates_path: env::var("TEMPLATES_PATH")
                .unwrap_or_else(|_| "data/week_templates.json".to_string()),
            password_iterations,
            secure_cookies: env::var("SECURE_COOKIES")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
                .unwrap_or(true),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
