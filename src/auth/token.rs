//! Opaque session tokens
//!
//! Tokens are random strings handed to the client once. Only their SHA-256
//! digest is persisted; validation looks the digest up and checks expiry.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    config::SecurityConfig,
    error::AppError,
    models::session::{IssuedToken, Session},
};

const TOKEN_PREFIX: &str = "qa_";
const TOKEN_RANDOM_LEN: usize = 48;

/// Why a presented token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Invalid,
    Expired,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => AppError::SessionNotFound,
            TokenError::Expired => AppError::SessionExpired,
        }
    }
}

/// Issues and validates session tokens
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.session_ttl_secs)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from `issued_at` for the configured lifetime
    pub fn issue(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> IssuedToken {
        self.issue_until(user_id, issued_at, issued_at + self.ttl)
    }

    /// Issue a token with an explicit expiry
    pub fn issue_until(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> IssuedToken {
        let token = Self::generate();

        IssuedToken {
            session: Session {
                id: Uuid::new_v4(),
                user_id,
                token_hash: Self::hash(&token),
                login_at: issued_at,
                expires_at,
            },
            token,
        }
    }

    /// Check a looked-up session against `now`
    pub fn validate(&self, session: Option<&Session>, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        let session = session.ok_or(TokenError::Invalid)?;

        if session.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(session.user_id)
    }

    /// Format: qa_<48-char-random>
    fn generate() -> String {
        let random: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_RANDOM_LEN)
            .map(char::from)
            .collect();

        format!("{}{}", TOKEN_PREFIX, random)
    }

    /// Hash token for storage using SHA-256
    pub fn hash(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
