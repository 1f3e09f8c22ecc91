// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with: FIRESTORE_EMULATOR_HOST=localhost:8081 cargo test --test firestore_integration
//!
//! The emulator provides a clean state for each test run.

use fitmotion_tracker::db::new_document_id;
use fitmotion_tracker::models::{User, Week, WeekStatus};
use fitmotion_tracker::services::{dedupe_weeks, TemplateCatalog};
use fitmotion_tracker::time_utils::now_rfc3339;

mod common;
use common::{test_db, week_with_sets};

/// Fresh user ID so tests never see each other's data.
fn unique_user_id() -> String {
    new_document_id().unwrap()
}

fn test_user(id: &str) -> User {
    let now = now_rfc3339();
    User {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: format!("{}@example.com", id),
        password_hash: "sha256$1000$00$00".to_string(),
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    }
}

fn owned_week(user_id: &str, week_of: &str) -> Week {
    let mut week = week_with_sets(&new_document_id().unwrap(), week_of, &[true, false]);
    week.user_id = user_id.to_string();
    week
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_lookup_by_id_and_email() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    assert!(db.get_user(&user_id).await.unwrap().is_none());

    let user = test_user(&user_id);
    db.upsert_user(&user).await.unwrap();

    let by_id = db.get_user(&user_id).await.unwrap().expect("user by id");
    assert_eq!(by_id.email, user.email);

    let by_email = db
        .find_user_by_email(&user.email)
        .await
        .unwrap()
        .expect("user by email");
    assert_eq!(by_email.id, user_id);

    assert!(db
        .find_user_by_email("nobody-here@example.com")
        .await
        .unwrap()
        .is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// WEEK TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_active_week_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let catalog = TemplateCatalog::load_from_file("data/week_templates.json").unwrap();

    assert!(db.get_active_week(&user_id).await.unwrap().is_none());

    let now = now_rfc3339();
    let week = Week::from_template(
        new_document_id().unwrap(),
        user_id.clone(),
        0,
        catalog.get(0).unwrap(),
        "2024-03-04".to_string(),
        &now,
    );
    db.upsert_week(&week).await.unwrap();

    let active = db.get_active_week(&user_id).await.unwrap().expect("active week");
    assert_eq!(active.id, week.id);

    // Save logged sets
    let mut days = active.days.clone();
    days[0].exercises[0].sets[0].done = true;
    assert!(db.save_week_days(&user_id, &week.id, days.clone()).await.unwrap());

    // Another user cannot touch it
    assert!(!db.save_week_days("someone-else", &week.id, days.clone()).await.unwrap());

    let archived = db
        .archive_week(&user_id, &week.id, days)
        .await
        .unwrap()
        .expect("archived week");
    assert_eq!(archived.status, WeekStatus::Archived);
    assert!(archived.archived_at.is_some());
    assert_eq!(archived.set_counts().completed, 1);

    // Archived weeks are no longer active
    assert!(db.get_active_week(&user_id).await.unwrap().is_none());
    assert!(!db.save_week_days(&user_id, &week.id, Vec::new()).await.unwrap());
}

#[tokio::test]
async fn test_list_weeks_scoped_and_deduplicated() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let other_user = unique_user_id();

    let mut first = owned_week(&user_id, "2024-03-04");
    first.updated_at = "2024-03-05T08:00:00.000Z".to_string();
    let mut duplicate = owned_week(&user_id, "2024-03-04");
    duplicate.updated_at = "2024-03-06T08:00:00.000Z".to_string();
    let next = owned_week(&user_id, "2024-03-11");
    let foreign = owned_week(&other_user, "2024-03-04");

    for week in [&first, &duplicate, &next, &foreign] {
        db.upsert_week(week).await.unwrap();
    }

    let raw = db.list_weeks_for_user(&user_id, None).await.unwrap();
    assert_eq!(raw.len(), 3);
    assert!(raw.iter().all(|w| w.user_id == user_id));

    let limited = db.list_weeks_for_user(&user_id, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);

    let deduped = dedupe_weeks(raw);
    assert_eq!(deduped.len(), 2);
    assert!(deduped.iter().any(|w| w.id == duplicate.id));
    assert!(!deduped.iter().any(|w| w.id == first.id));
}

#[tokio::test]
async fn test_save_after_archive_keeps_week_archived() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let week = owned_week(&user_id, "2024-03-18");
    db.upsert_week(&week).await.unwrap();

    let stale_days = week.days.clone();
    db.archive_week(&user_id, &week.id, week.days.clone())
        .await
        .unwrap()
        .expect("archived week");

    // A save from a tab that still shows the week as active
    assert!(!db.save_week_days(&user_id, &week.id, stale_days).await.unwrap());

    let stored = db.get_week(&week.id).await.unwrap().expect("stored week");
    assert_eq!(stored.status, WeekStatus::Archived);
    assert!(stored.archived_at.is_some());
    assert!(db.get_active_week(&user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_only_touches_days_and_timestamp() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let week = owned_week(&user_id, "2024-03-25");
    db.upsert_week(&week).await.unwrap();

    let mut days = week.days.clone();
    days[0].exercises[0].sets[1].done = true;
    assert!(db.save_week_days(&user_id, &week.id, days).await.unwrap());

    let stored = db.get_week(&week.id).await.unwrap().expect("stored week");
    assert_eq!(stored.status, WeekStatus::Active);
    assert_eq!(stored.created_at, week.created_at);
    assert_eq!(stored.template_key, week.template_key);
    assert_eq!(stored.set_counts().completed, 2);
}
