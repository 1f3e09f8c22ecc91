// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitMotion API Server
//!
//! Serves workout weeks built from training templates, stores logged sets
//! and reports progress across archived weeks.

use fitmotion_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{CredentialHasher, TemplateCatalog},
    AppState,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FitMotion API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    // Load week templates
    tracing::info!(path = %config.templates_path, "Loading week templates");
    let templates = TemplateCatalog::load_from_file(&config.templates_path)?;
    tracing::info!(count = templates.len(), "Week templates loaded");

    let iterations = NonZeroU32::new(config.password_iterations)
        .ok_or("PASSWORD_ITERATIONS must be positive")?;
    let hasher = CredentialHasher::new(iterations);
    tracing::info!(
        iterations = config.password_iterations,
        "Credential hasher initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        templates,
        hasher,
    });

    // Build router
    let app = fitmotion_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitmotion_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
