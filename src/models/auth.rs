//! Sign-in / sign-out DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Result of a successful sign-in
#[derive(Debug, Clone)]
pub struct SignIn {
    pub user: User,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub id: Uuid,
    pub message: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignoutResponse {
    pub id: Uuid,
    pub message: String,
}
