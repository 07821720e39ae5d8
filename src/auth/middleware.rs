//! 会话认证中间件

use crate::{error::AppError, middleware::AppState, models::user::User};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub token: String,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

fn authorization_header(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)
}

/// 从 Authorization 头提取 Bearer 令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    authorization_header(headers)?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(AppError::Unauthenticated)
}

/// 从 Authorization 头提取 Basic 用户名与密码
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<(String, String), AppError> {
    let encoded = authorization_header(headers)?
        .strip_prefix("Basic ")
        .ok_or(AppError::Unauthenticated)?;

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Validation("Authorization header is not valid base64".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AppError::Validation("Authorization header is not valid UTF-8".to_string()))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::Validation("Expected credentials as username:password".to_string()))?;

    Ok((username.to_string(), password.to_string()))
}

/// 会话认证中间件 - 必须认证
pub async fn session_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let user = state.auth_service.authorize(&token).await?;

    tracing::debug!(user_id = %user.id, "Request authenticated");

    req.extensions_mut().insert(AuthContext { user, token });

    Ok(next.run(req).await)
}
