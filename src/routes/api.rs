// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::db::new_document_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    DayEntry, ProgressData, TemplateSummary, UserResponse, Week, WeekStatus,
};
use crate::services::{build_progress, dedupe_weeks};
use crate::time_utils::{current_week_of, now_rfc3339};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// How many weeks the archive view shows.
const WEEK_LIST_LIMIT: u32 = 24;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/templates", get(get_templates))
        .route("/api/week", get(get_week).put(save_week))
        .route("/api/week/new", post(start_new_week))
        .route("/api/weeks", get(list_weeks))
        .route("/api/progress", get(get_progress))
}

// ─── User Profile ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user: UserResponse,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(MeResponse {
        user: UserResponse::from(&profile),
    }))
}

// ─── Templates ───────────────────────────────────────────────

async fn get_templates(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateSummary>> {
    Json(state.templates.summaries())
}

// ─── Current Week ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekResponse {
    pub week: Week,
}

/// Body for saving or archiving the active week. Checked by `into_parts`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeekRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub days: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeekRequest {
    #[serde(flatten)]
    pub week: SaveWeekRequest,
    #[serde(default)]
    pub template_index: Option<Value>,
}

#[derive(Serialize)]
pub struct SaveWeekResponse {
    pub ok: bool,
}

impl SaveWeekRequest {
    fn into_parts(self) -> Result<(String, Vec<DayEntry>)> {
        let invalid = || AppError::BadRequest("Invalid payload".to_string());

        let id = match self.id {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            _ => return Err(invalid()),
        };
        let days = self.days.ok_or_else(invalid)?;
        let days = serde_json::from_value(days).map_err(|_| invalid())?;

        Ok((id, days))
    }
}

/// Build and store a fresh active week for the current Monday.
async fn create_week(state: &AppState, user_id: &str, template_index: usize) -> Result<Week> {
    let template = state
        .templates
        .get(template_index)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Template catalog is empty")))?;

    let week = Week::from_template(
        new_document_id()?,
        user_id.to_string(),
        template_index,
        template,
        current_week_of(),
        &now_rfc3339(),
    );
    state.db.upsert_week(&week).await?;

    tracing::info!(
        user_id,
        week_id = %week.id,
        week_of = %week.week_of,
        template = %week.template_key,
        "Created week"
    );
    Ok(week)
}

/// Get the user's active week, creating one from the first template if none exists.
async fn get_week(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeekResponse>> {
    let week = match state.db.get_active_week(&user.user_id).await? {
        Some(week) => week,
        None => create_week(&state, &user.user_id, 0).await?,
    };

    Ok(Json(WeekResponse { week }))
}

/// Save progress on the active week.
async fn save_week(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<SaveWeekRequest>, AppError>,
) -> Result<Json<SaveWeekResponse>> {
    let (week_id, days) = payload.into_parts()?;

    if !state.db.save_week_days(&user.user_id, &week_id, days).await? {
        return Err(AppError::NotFound("Week not found".to_string()));
    }

    Ok(Json(SaveWeekResponse { ok: true }))
}

/// Check a requested template index against the catalog.
///
/// Only numbers are considered; any other value falls back to rotation.
fn validate_template_index(requested: Option<&Value>, catalog_len: usize) -> Result<Option<usize>> {
    let Some(Value::Number(index)) = requested else {
        return Ok(None);
    };

    index
        .as_u64()
        .or_else(|| {
            index
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < catalog_len)
        .map(Some)
        .ok_or_else(|| AppError::BadRequest("Invalid template".to_string()))
}

/// Archive the active week and start the next one.
async fn start_new_week(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<NewWeekRequest>, AppError>,
) -> Result<Json<WeekResponse>> {
    let (week_id, days) = payload.week.into_parts()?;
    let requested = validate_template_index(payload.template_index.as_ref(), state.templates.len())?;

    let archived = state
        .db
        .archive_week(&user.user_id, &week_id, days)
        .await?
        .ok_or_else(|| AppError::NotFound("Week not found".to_string()))?;

    let template_index = requested
        .unwrap_or_else(|| state.templates.next_template_index(archived.template_index));
    let week = create_week(&state, &user.user_id, template_index).await?;

    Ok(Json(WeekResponse { week }))
}

// ─── Week Archive ────────────────────────────────────────────

/// One entry in the week list.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekListEntry {
    pub id: String,
    pub week_of: String,
    pub template_title: String,
    pub description: String,
    pub status: WeekStatus,
    pub created_at: String,
    pub updated_at: String,
    pub archived_at: Option<String>,
    pub completed: u32,
    pub total: u32,
    pub days: Vec<DayEntry>,
}

impl From<Week> for WeekListEntry {
    fn from(week: Week) -> Self {
        let counts = week.set_counts();
        Self {
            id: week.id,
            week_of: week.week_of,
            template_title: week.template_title,
            description: week.description,
            status: week.status,
            created_at: week.created_at,
            updated_at: week.updated_at,
            archived_at: week.archived_at,
            completed: counts.completed,
            total: counts.total,
            days: week.days,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekListResponse {
    pub weeks: Vec<WeekListEntry>,
}

/// List the user's recent weeks, one per calendar week.
async fn list_weeks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeekListResponse>> {
    let raw = state
        .db
        .list_weeks_for_user(&user.user_id, Some(WEEK_LIST_LIMIT))
        .await?;
    let fetched = raw.len();

    let weeks: Vec<WeekListEntry> = dedupe_weeks(raw).into_iter().map(Into::into).collect();

    tracing::debug!(
        user_id = %user.user_id,
        fetched,
        returned = weeks.len(),
        "Listed weeks"
    );

    Ok(Json(WeekListResponse { weeks }))
}

// ─── Progress ────────────────────────────────────────────────

/// Aggregate all of the user's weeks into dashboard statistics.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressData>> {
    let weeks = dedupe_weeks(state.db.list_weeks_for_user(&user.user_id, None).await?);
    Ok(Json(build_progress(&weeks)))
}
