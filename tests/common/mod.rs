// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitmotion_tracker::config::Config;
use fitmotion_tracker::db::FirestoreDb;
use fitmotion_tracker::models::{DayEntry, ExerciseEntry, ExerciseType, SetEntry, Week, WeekStatus};
use fitmotion_tracker::routes::create_router;
use fitmotion_tracker::services::{CredentialHasher, TemplateCatalog};
use fitmotion_tracker::AppState;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let templates = TemplateCatalog::load_from_file(&config.templates_path)
        .expect("Failed to load week templates");
    let iterations = NonZeroU32::new(config.password_iterations).expect("iterations > 0");

    let state = Arc::new(AppState {
        config,
        db: test_db_offline(),
        templates,
        hasher: CredentialHasher::new(iterations),
    });

    (create_router(state.clone()), state)
}

/// Create a session token the auth middleware will accept.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    fitmotion_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create JWT")
}

/// Build a week with one day holding one exercise whose sets are done
/// according to `done`.
#[allow(dead_code)]
pub fn week_with_sets(id: &str, week_of: &str, done: &[bool]) -> Week {
    let sets = done
        .iter()
        .enumerate()
        .map(|(i, &done)| SetEntry {
            set: i as u32 + 1,
            weight: "50".to_string(),
            reps_or_sec: "10".to_string(),
            rpe: String::new(),
            done,
        })
        .collect();

    Week {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        week_of: week_of.to_string(),
        template_key: "foundation".to_string(),
        template_title: "Foundation".to_string(),
        template_index: 0,
        description: String::new(),
        status: WeekStatus::Active,
        created_at: format!("{}T08:00:00.000Z", week_of),
        updated_at: format!("{}T09:00:00.000Z", week_of),
        archived_at: None,
        days: vec![DayEntry {
            id: "foundation-d1".to_string(),
            short_name: "D1".to_string(),
            name: "Lower".to_string(),
            exercises: vec![ExerciseEntry {
                name: "Squat".to_string(),
                target: "3x10".to_string(),
                how: String::new(),
                kind: ExerciseType::Reps,
                sets,
            }],
        }],
    }
}
