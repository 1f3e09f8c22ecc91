// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts and credentials)
//! - Weeks (per-user workout weeks, active and archived)
//!
//! Updates are read-modify-write with last write wins; duplicate weeks
//! that slip through are collapsed by `services::dedup` when read.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DayEntry, User, Week, WeekStatus};
use crate::time_utils::now_rfc3339;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Week Operations ─────────────────────────────────────────

    /// Get a week by ID, regardless of owner.
    pub async fn get_week(&self, week_id: &str) -> Result<Option<Week>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WEEKS)
            .obj()
            .one(week_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the user's most recently created active week.
    pub async fn get_active_week(&self, user_id: &str) -> Result<Option<Week>, AppError> {
        let weeks: Vec<Week> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WEEKS)
            .filter(|q| {
                q.for_all([
                    q.field("userId").eq(user_id),
                    q.field("status").eq("active"),
                ])
            })
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(weeks.into_iter().next())
    }

    /// List the user's weeks, most recently created first.
    pub async fn list_weeks_for_user(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Week>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WEEKS)
            .filter(|q| q.for_all([q.field("userId").eq(user_id)]))
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)]);

        let query = match limit {
            Some(limit) => query.limit(limit),
            None => query,
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a week.
    pub async fn upsert_week(&self, week: &Week) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WEEKS)
            .document_id(&week.id)
            .object(week)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace the days of the user's active week.
    ///
    /// Returns `false` if no active week with that ID belongs to the user.
    pub async fn save_week_days(
        &self,
        user_id: &str,
        week_id: &str,
        days: Vec<DayEntry>,
    ) -> Result<bool, AppError> {
        let saved = self
            .update_active_week(user_id, week_id, &["days", "updatedAt"], |week, now| {
                week.days = days;
                week.updated_at = now.to_string();
            })
            .await?;

        if saved.is_some() {
            tracing::debug!(user_id, week_id, "Week saved");
        }
        Ok(saved.is_some())
    }

    /// Archive the user's active week with its final days.
    ///
    /// Returns the archived week, or `None` if no matching active week exists.
    pub async fn archive_week(
        &self,
        user_id: &str,
        week_id: &str,
        days: Vec<DayEntry>,
    ) -> Result<Option<Week>, AppError> {
        let archived = self
            .update_active_week(
                user_id,
                week_id,
                &["days", "status", "archivedAt", "updatedAt"],
                |week, now| {
                    week.days = days;
                    week.status = WeekStatus::Archived;
                    week.archived_at = Some(now.to_string());
                    week.updated_at = now.to_string();
                },
            )
            .await?;

        if let Some(week) = &archived {
            tracing::info!(user_id, week_id, week_of = %week.week_of, "Week archived");
        }
        Ok(archived)
    }

    /// Apply `change` to the user's active week and write back only `fields`.
    ///
    /// The status check and the write share one transaction, so a week
    /// archived by a concurrent request is never written back as active.
    async fn update_active_week<F>(
        &self,
        user_id: &str,
        week_id: &str,
        fields: &[&str],
        change: F,
    ) -> Result<Option<Week>, AppError>
    where
        F: FnOnce(&mut Week, &str),
    {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Reading through the transaction registers the week for conflict detection
        let in_transaction = client.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );
        let current: Option<Week> = in_transaction
            .fluent()
            .select()
            .by_id_in(collections::WEEKS)
            .obj()
            .one(week_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read week in transaction: {}", e)))?;

        let Some(mut week) = current.filter(|w| is_active_for(w, user_id)) else {
            let _ = transaction.rollback().await;
            return Ok(None);
        };

        change(&mut week, &now_rfc3339());

        client
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::WEEKS)
            .precondition(firestore::FirestoreWritePrecondition::Exists(true))
            .document_id(&week.id)
            .object(&week)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add week to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(Some(week))
    }
}

/// Whether `week` belongs to `user_id` and can still be edited.
fn is_active_for(week: &Week, user_id: &str) -> bool {
    week.user_id == user_id && week.status == WeekStatus::Active
}
