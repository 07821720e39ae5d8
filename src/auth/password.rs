//! Password hashing and verification using Argon2id
//!
//! The salt and the digest are stored separately; verification recomputes the
//! digest from the stored salt and compares outputs in constant time.

use crate::{config::SecurityConfig, error::AppError};
use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{rand_core::OsRng, Output, PasswordHasher as _, SaltString};

/// Salt and digest produced by [`PasswordHasher::hash`]
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub salt: String,
    pub digest: String,
}

/// Password hasher with configurable parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with default parameters (OWASP recommended)
    pub fn new() -> Self {
        // m=19MiB, t=2 iterations, p=1 lane
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT);

        Self { argon2 }
    }

    /// Create hasher with explicit cost parameters
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Config(format!("Invalid Argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        Self::with_params(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<HashedPassword, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let digest = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .hash
            .ok_or_else(|| AppError::Internal("Argon2 produced no output".to_string()))?;

        Ok(HashedPassword {
            salt: salt.as_str().to_string(),
            digest: digest.to_string(),
        })
    }

    /// Verify a password against a stored salt and digest
    ///
    /// Malformed stored values never error, they just fail verification.
    pub fn verify(&self, password: &str, salt: &str, expected_digest: &str) -> bool {
        let Ok(salt) = SaltString::from_b64(salt) else {
            tracing::debug!("Stored password salt is malformed");
            return false;
        };
        let Ok(expected) = Output::b64_decode(expected_digest) else {
            tracing::debug!("Stored password digest is malformed");
            return false;
        };

        match self.argon2.hash_password(password.as_bytes(), &salt) {
            Ok(computed) => computed.hash.is_some_and(|actual| actual == expected),
            Err(e) => {
                tracing::debug!("Failed to recompute password digest: {:?}", e);
                false
            }
        }
    }

    /// Validate password against policy
    pub fn validate_password_policy(password: &str, policy: &SecurityConfig) -> Result<(), AppError> {
        // Check length
        if password.chars().count() < policy.password_min_length {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                policy.password_min_length
            )));
        }

        // Check uppercase
        if policy.password_require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::Validation(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        // Check digit
        if policy.password_require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::Validation(
                "Password must contain at least one digit".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
