//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Week records (keyed by random ID, scoped by `userId`)
    pub const WEEKS: &str = "weeks";
}

/// Generate a random 24-character hex document ID.
pub fn new_document_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 12];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Random ID generation failed")))?;
    Ok(hex::encode(bytes))
}
