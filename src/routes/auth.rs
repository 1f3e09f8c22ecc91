// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::new_document_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::models::user::normalize_email;
use crate::models::{User, UserResponse};
use crate::services::credentials::verify_password;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Registration payload. Fields are trimmed before validation.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    name: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    email: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 256,
        message = "Choose a password with at least 8 characters."
    ))]
    password: String,
}

impl RegisterRequest {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Session JWT (also set as an HttpOnly cookie)
    pub token: String,
}

/// Pick a human-readable message out of validation errors.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request.".to_string())
}

/// Create a new account.
async fn register(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let payload = payload.trimmed();

    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Name, email, and password are required.".to_string(),
        ));
    }
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(validation_message(&e)))?;

    let email = normalize_email(&payload.email);
    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "An account with that email already exists.".to_string(),
        ));
    }

    // PBKDF2 is CPU-bound; run it off the async workers.
    let hasher = state.hasher.clone();
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))?
        .map_err(anyhow::Error::from)?;

    let now = now_rfc3339();
    let user = User {
        id: new_document_id()?,
        name: payload.name,
        email,
        password_hash,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(&user),
        }),
    ))
}

/// Check credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let email = payload.email.trim();
    let password = payload.password.trim().to_string();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }

    let Some(mut user) = state.db.find_user_by_email(&normalize_email(email)).await? else {
        tracing::debug!("Login for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let stored = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e))
        })?;

    if !valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let now = now_rfc3339();
    user.last_login_at = Some(now.clone());
    user.updated_at = now;
    state.db.upsert_user(&user).await?;

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64));

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}

/// End the session by clearing the cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_trims_and_validates() {
        let request = RegisterRequest {
            name: "  Jane ".to_string(),
            email: " jane@example.com ".to_string(),
            password: "  longenough  ".to_string(),
        }
        .trimmed();

        assert_eq!(request.name, "Jane");
        assert_eq!(request.password, "longenough");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_short_password_message() {
        let request = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "short".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Choose a password with at least 8 characters."
        );
    }

    #[test]
    fn test_bad_email_message() {
        let request = RegisterRequest {
            name: "Jane".to_string(),
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Enter a valid email address.");
    }
}
