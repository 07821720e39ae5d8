//! HTTP 处理器模块

pub mod admin;
pub mod answer;
pub mod common;
pub mod health;
pub mod question;
pub mod user;

use axum::extract::{rejection::PathRejection, Path};
use uuid::Uuid;

use crate::error::{AppError, Resource};

/// 解析路径中的资源 id；无法解析的 id 视为资源不存在
pub(crate) fn path_id(
    path: Result<Path<Uuid>, PathRejection>,
    resource: Resource,
) -> Result<Uuid, AppError> {
    path.map(|Path(id)| id).map_err(|e| {
        tracing::debug!(error = %e, resource = %resource, "Unparseable id in path");
        AppError::NotFound(resource)
    })
}
