//! Salted adaptive password hashing.
//!
//! New hashes use bcrypt. Each credentials row records its algorithm, so
//! argon2 hashes keep verifying if the configured algorithm changes.

use std::fmt;
use std::str::FromStr;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use super::errors::AuthError;

pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordAlgorithm {
    #[default]
    Bcrypt,
    Argon2,
}

impl PasswordAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordAlgorithm::Bcrypt => "bcrypt",
            PasswordAlgorithm::Argon2 => "argon2",
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bcrypt" => Ok(PasswordAlgorithm::Bcrypt),
            "argon2" => Ok(PasswordAlgorithm::Argon2),
            other => Err(AuthError::HashError(format!("unsupported password algorithm: {other}"))),
        }
    }
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, algorithm: PasswordAlgorithm, bcrypt_cost: u32) -> Result<String, AuthError> {
    match algorithm {
        PasswordAlgorithm::Bcrypt => {
            bcrypt::hash(password, bcrypt_cost).map_err(|e| AuthError::HashError(e.to_string()))
        }
        PasswordAlgorithm::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Ok(Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| AuthError::HashError(e.to_string()))?
                .to_string())
        }
    }
}

/// Check `password` against a stored hash. A mismatch is `Ok(false)`;
/// only an unreadable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str, algorithm: PasswordAlgorithm) -> Result<bool, AuthError> {
    match algorithm {
        PasswordAlgorithm::Bcrypt => {
            bcrypt::verify(password, stored_hash).map_err(|e| AuthError::HashError(e.to_string()))
        }
        PasswordAlgorithm::Argon2 => {
            let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
            Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the suite fast
    const TEST_COST: u32 = 4;

    #[test]
    fn bcrypt_roundtrip() {
        let hash = hash_password("hunter2", PasswordAlgorithm::Bcrypt, TEST_COST).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("hunter2", &hash, PasswordAlgorithm::Bcrypt).unwrap());
        assert!(!verify_password("hunter3", &hash, PasswordAlgorithm::Bcrypt).unwrap());
    }

    #[test]
    fn default_cost_is_embedded_in_hash() {
        let hash = hash_password("pw", PasswordAlgorithm::Bcrypt, DEFAULT_BCRYPT_COST).unwrap();
        assert!(hash.contains("$10$"));
    }

    #[test]
    fn salts_differ_per_hash() {
        let a = hash_password("same", PasswordAlgorithm::Bcrypt, TEST_COST).unwrap();
        let b = hash_password("same", PasswordAlgorithm::Bcrypt, TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn argon2_roundtrip() {
        let hash = hash_password("hunter2", PasswordAlgorithm::Argon2, TEST_COST).unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash, PasswordAlgorithm::Argon2).unwrap());
        assert!(!verify_password("nope", &hash, PasswordAlgorithm::Argon2).unwrap());
    }

    #[test]
    fn garbage_hash_is_error() {
        assert!(verify_password("x", "not-a-hash", PasswordAlgorithm::Argon2).is_err());
        assert!(verify_password("x", "not-a-hash", PasswordAlgorithm::Bcrypt).is_err());
    }

    #[test]
    fn algorithm_names_roundtrip() {
        assert_eq!("bcrypt".parse::<PasswordAlgorithm>().unwrap(), PasswordAlgorithm::Bcrypt);
        assert_eq!(PasswordAlgorithm::Argon2.to_string(), "argon2");
        assert!("md5".parse::<PasswordAlgorithm>().is_err());
    }
}
