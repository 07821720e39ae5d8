//! 管理员操作

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
    models::user::UserDeleteResponse,
};

/// 删除用户（仅管理员）
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserDeleteResponse>, AppError> {
    let user_id = path_id(path, Resource::User)?;
    let id = state.user_service.delete_user(&auth.user, user_id).await?;

    Ok(Json(UserDeleteResponse {
        id,
        status: "USER SUCCESSFULLY DELETED".to_string(),
    }))
}
