//! 用户注册、登录、登出的 HTTP 处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::{extract_basic_credentials, extract_token},
    error::AppError,
    middleware::AppState,
    models::{
        auth::{SigninResponse, SignoutResponse},
        user::{SignupUserRequest, SignupUserResponse},
    },
};

/// 登录成功后返回令牌的响应头
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// 注册
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignupUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body?;
    let user = state.user_service.sign_up(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupUserResponse {
            id: user.id,
            status: "USER SUCCESSFULLY REGISTERED".to_string(),
        }),
    ))
}

/// 登录（Authorization: Basic base64(username:password)）
pub async fn signin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = extract_basic_credentials(&headers)?;

    let signed_in = state.auth_service.sign_in(&username, &password).await?;

    let mut response_headers = HeaderMap::new();
    let token_value = HeaderValue::from_str(&signed_in.access_token)
        .map_err(|e| AppError::Internal(format!("token is not a valid header value: {}", e)))?;
    response_headers.insert(ACCESS_TOKEN_HEADER, token_value);

    Ok((
        response_headers,
        Json(SigninResponse {
            id: signed_in.user.id,
            message: "SIGNED IN SUCCESSFULLY".to_string(),
            access_token: signed_in.access_token,
            expires_at: signed_in.expires_at,
        }),
    ))
}

/// 登出
pub async fn signout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = extract_token(&headers)?;

    let user_id = state.auth_service.sign_out(&token).await?;

    Ok(Json(SignoutResponse {
        id: user_id,
        message: "SIGNED OUT SUCCESSFULLY".to_string(),
    }))
}
