//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Random hex ID (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Normalized (trimmed, lowercase) email address
    pub email: String,
    /// Serialized PBKDF2 credential, see `services::credentials`
    pub password_hash: String,
    /// When the account was created (ISO 8601)
    pub created_at: String,
    /// Last profile change (ISO 8601)
    pub updated_at: String,
    /// Last successful login (ISO 8601)
    #[serde(default)]
    pub last_login_at: Option<String>,
}

/// Public view of a user (never includes the credential).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
            last_login_at: user.last_login_at.clone(),
        }
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
