//! 认证服务
//!
//! Sign-in issues an opaque session token, sign-out removes it, and
//! `authorize` resolves a presented token back to its user.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    auth::{password::PasswordHasher, token::TokenIssuer},
    error::AppError,
    models::{auth::SignIn, user::User},
    repository::Repositories,
};

pub struct AuthService {
    repos: Repositories,
    hasher: Arc<PasswordHasher>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(repos: Repositories, hasher: Arc<PasswordHasher>, issuer: TokenIssuer) -> Self {
        Self {
            repos,
            hasher,
            issuer,
        }
    }

    /// 用户登录
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignIn, AppError> {
        self.sign_in_at(username, password, Utc::now()).await
    }

    pub async fn sign_in_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<SignIn, AppError> {
        // 与注册时的用户名规范化一致
        let username = username.trim();

        let Some(user) = self.repos.users.find_by_username(username).await? else {
            tracing::warn!(username = %username, reason = "unknown_username", "Sign-in failed");
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.salt, &user.password_hash) {
            tracing::warn!(user_id = %user.id, reason = "password_mismatch", "Sign-in failed");
            return Err(AppError::InvalidCredentials);
        }

        let issued = self.issuer.issue(user.id, now);
        self.repos.sessions.create(&issued.session).await?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %issued.session.expires_at,
            "User signed in"
        );

        Ok(SignIn {
            expires_at: issued.session.expires_at,
            access_token: issued.token,
            user,
        })
    }

    /// 用户登出，返回会话所属用户
    pub async fn sign_out(&self, token: &str) -> Result<uuid::Uuid, AppError> {
        let token_hash = TokenIssuer::hash(token);

        let user_id = self
            .repos
            .sessions
            .delete_by_token_hash(&token_hash)
            .await?
            .ok_or(AppError::SessionNotFound)?;

        tracing::info!(user_id = %user_id, "User signed out");

        Ok(user_id)
    }

    /// 校验令牌并解析出用户
    pub async fn authorize(&self, token: &str) -> Result<User, AppError> {
        self.authorize_at(token, Utc::now()).await
    }

    pub async fn authorize_at(&self, token: &str, now: DateTime<Utc>) -> Result<User, AppError> {
        let token_hash = TokenIssuer::hash(token);
        let session = self.repos.sessions.find_by_token_hash(&token_hash).await?;

        let user_id = self.issuer.validate(session.as_ref(), now).map_err(|e| {
            tracing::debug!(reason = ?e, "Token rejected");
            AppError::from(e)
        })?;

        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::SessionNotFound)
    }

    /// 清理过期会话
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let purged = self.repos.sessions.purge_expired(Utc::now()).await?;

        if purged > 0 {
            tracing::info!(purged, "Expired sessions purged");
        }

        Ok(purged)
    }
}
