//! 用户资料查询

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    auth::AuthContext,
    error::{AppError, Resource},
    handlers::path_id,
    middleware::AppState,
    models::user::UserDetailsResponse,
};

/// 获取用户资料
pub async fn user_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserDetailsResponse>, AppError> {
    let user_id = path_id(path, Resource::User)?;
    let user = state.user_service.get_profile(&auth.user, user_id).await?;

    Ok(Json(UserDetailsResponse::from(user)))
}
