// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password credential hashing and verification.
//!
//! Credentials are PBKDF2-HMAC derived keys serialized as
//! `algorithm$iterations$salt-hex$key-hex`. Verification always uses the
//! parameters embedded in the stored string, so raising the default
//! iteration count never invalidates existing accounts.
//!
//! The hex salt string itself (not its decoded bytes) is fed to PBKDF2.
//! This keeps credentials written by the previous Node.js backend valid.

use std::fmt;
use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use subtle::ConstantTimeEq;

/// Algorithm identifier written into new credentials.
pub const DEFAULT_ALGORITHM: &str = "sha256";
/// Iteration count for new credentials.
pub const DEFAULT_ITERATIONS: u32 = 310_000;
/// Derived key length in bytes.
pub const KEY_LENGTH: usize = 64;
/// Salt length in bytes (before hex encoding).
pub const SALT_LENGTH: usize = 16;

const DELIMITER: char = '$';

const DEFAULT_COST: NonZeroU32 = match NonZeroU32::new(DEFAULT_ITERATIONS) {
    Some(iterations) => iterations,
    None => panic!("DEFAULT_ITERATIONS must be non-zero"),
};

/// Errors from credential creation.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Secure random number generator unavailable")]
    Randomness,
}

/// Map a stored algorithm identifier to its PBKDF2 PRF.
fn pbkdf2_algorithm(id: &str) -> Option<pbkdf2::Algorithm> {
    match id {
        "sha256" => Some(pbkdf2::PBKDF2_HMAC_SHA256),
        "sha384" => Some(pbkdf2::PBKDF2_HMAC_SHA384),
        "sha512" => Some(pbkdf2::PBKDF2_HMAC_SHA512),
        _ => None,
    }
}

/// A parsed credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub algorithm: String,
    pub iterations: NonZeroU32,
    /// Hex-encoded salt, exactly as stored
    pub salt: String,
    pub derived_key: Vec<u8>,
}

impl Credential {
    /// Parse a stored credential string.
    ///
    /// Returns `None` for anything other than four `$`-separated fields
    /// with a positive iteration count and a non-empty hex key.
    pub fn parse(stored: &str) -> Option<Self> {
        let parts: Vec<&str> = stored.split(DELIMITER).collect();
        let [algorithm, iterations, salt, key] = parts.as_slice() else {
            return None;
        };

        let iterations = iterations.parse::<u32>().ok().and_then(NonZeroU32::new)?;
        let derived_key = hex::decode(key).ok()?;
        if derived_key.is_empty() {
            return None;
        }

        Some(Self {
            algorithm: algorithm.to_string(),
            iterations,
            salt: salt.to_string(),
            derived_key,
        })
    }

    /// Check a plaintext password against this credential.
    pub fn matches(&self, password: &str) -> bool {
        let Some(algorithm) = pbkdf2_algorithm(&self.algorithm) else {
            return false;
        };

        let mut derived = vec![0u8; self.derived_key.len()];
        pbkdf2::derive(
            algorithm,
            self.iterations,
            self.salt.as_bytes(),
            password.as_bytes(),
            &mut derived,
        );

        // `ct_eq` on slices returns early only on a length mismatch.
        derived.ct_eq(&self.derived_key).into()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}",
            self.algorithm,
            self.iterations,
            self.salt,
            hex::encode(&self.derived_key),
            d = DELIMITER
        )
    }
}

/// Creates new credentials with a fixed cost.
#[derive(Clone)]
pub struct CredentialHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            rng: SystemRandom::new(),
        }
    }

    /// Hash a password with a freshly generated salt.
    ///
    /// Returns the serialized credential; this is the only value to persist.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt_bytes)
            .map_err(|_| CredentialError::Randomness)?;
        let salt = hex::encode(salt_bytes);

        let mut derived_key = vec![0u8; KEY_LENGTH];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            salt.as_bytes(),
            password.as_bytes(),
            &mut derived_key,
        );

        let credential = Credential {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            iterations: self.iterations,
            salt,
            derived_key,
        };
        Ok(credential.to_string())
    }
}

/// Hash a password with the default cost.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    CredentialHasher::default().hash(password)
}

/// Verify a password against a stored credential string.
///
/// Malformed or unsupported credentials simply fail verification.
pub fn verify_password(password: &str, stored: &str) -> bool {
    Credential::parse(stored).is_some_and(|credential| credential.matches(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> CredentialHasher {
        CredentialHasher::new(NonZeroU32::new(1_000).unwrap())
    }

    #[test]
    fn test_hash_format() {
        let stored = fast_hasher().hash("correct horse").unwrap();
        let parts: Vec<&str> = stored.split('$').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "sha256");
        assert_eq!(parts[1], "1000");
        assert_eq!(parts[2].len(), SALT_LENGTH * 2);
        assert_eq!(parts[3].len(), KEY_LENGTH * 2);
    }

    #[test]
    fn test_default_hasher_uses_default_iterations() {
        assert_eq!(CredentialHasher::default().iterations.get(), DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_parse_round_trips_display() {
        let stored = fast_hasher().hash("pw").unwrap();
        let credential = Credential::parse(&stored).unwrap();
        assert_eq!(credential.to_string(), stored);
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        assert!(Credential::parse("sha256$0$abcd$abcd").is_none());
        assert!(Credential::parse("sha256$-5$abcd$abcd").is_none());
        assert!(Credential::parse("sha256$ten$abcd$abcd").is_none());
        assert!(Credential::parse("sha256$1000$abcd$zz").is_none());
        assert!(Credential::parse("sha256$1000$abcd$").is_none());
        assert!(Credential::parse("sha256$1000$abcd").is_none());
        assert!(Credential::parse("sha256$1000$ab$cd$ef").is_none());
    }

    #[test]
    fn test_unknown_algorithm_fails() {
        let stored = fast_hasher().hash("pw").unwrap();
        let swapped = stored.replacen("sha256", "md5", 1);
        assert!(!verify_password("pw", &swapped));
    }

    #[test]
    fn test_verify_uses_stored_key_length() {
        // A 32-byte key derived with the same salt must still verify.
        let salt = "00112233445566778899aabbccddeeff";
        let mut key = [0u8; 32];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            NonZeroU32::new(10).unwrap(),
            salt.as_bytes(),
            b"secret",
            &mut key,
        );
        let stored = format!("sha256$10${}${}", salt, hex::encode(key));

        assert!(verify_password("secret", &stored));
        assert!(!verify_password("Secret", &stored));
    }

    #[test]
    fn test_tampered_key_fails() {
        let stored = fast_hasher().hash("pw").unwrap();
        let mut credential = Credential::parse(&stored).unwrap();
        let last = credential.derived_key.len() - 1;
        credential.derived_key[last] ^= 0x01;
        assert!(!verify_password("pw", &credential.to_string()));
    }
}
