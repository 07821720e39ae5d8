//! User domain models

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,30}$").expect("username pattern compiles"));

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub contact_number: Option<String>,

    pub role: String, // admin, nonadmin

    // Credentials
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub salt: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from(self.role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    NonAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::NonAdmin => "nonadmin",
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            _ => Role::NonAdmin,
        }
    }
}

/// Sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub user_name: String,
    #[validate(email, length(max = 200))]
    pub email_address: String,
    pub password: String,
    #[validate(length(max = 60))]
    pub country: Option<String>,
    #[validate(length(max = 2000))]
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 30))]
    pub contact_number: Option<String>,
}

impl SignupUserRequest {
    /// Username as stored: trimmed, case preserved
    pub fn normalized_username(&self) -> String {
        self.user_name.trim().to_string()
    }

    /// Email as stored: trimmed and lower-cased
    pub fn normalized_email(&self) -> String {
        self.email_address.trim().to_lowercase()
    }
}

/// Reject usernames outside `[A-Za-z0-9_.-]{1,30}`
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username must be 1-30 characters of letters, digits, '_', '.' or '-'".to_string(),
        ))
    }
}

/// Sign-up response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupUserResponse {
    pub id: Uuid,
    pub status: String,
}

/// User profile (without credentials)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub id: Uuid,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

impl From<User> for UserDetailsResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email,
            country: user.country,
            about_me: user.about_me,
            dob: user.dob,
            contact_number: user.contact_number,
        }
    }
}

/// Admin delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDeleteResponse {
    pub id: Uuid,
    pub status: String,
}
