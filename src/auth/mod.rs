//! Authentication and authorization module

pub mod middleware;
pub mod password;
pub mod permission;
pub mod token;

pub use middleware::{extract_basic_credentials, extract_token, session_auth_middleware, AuthContext};
pub use password::PasswordHasher;
pub use permission::{require_permission, Action};
pub use token::TokenIssuer;
