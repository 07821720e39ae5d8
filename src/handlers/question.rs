//! 问题的 HTTP 处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    auth::AuthContext,
    error::{AppError, Resource},
    handlers::path_id,
    middleware::AppState,
    models::question::{QuestionDetailsResponse, QuestionRequest, QuestionResponse},
};

/// 创建问题
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    body: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body?;
    let question = state.question_service.create(&auth.user, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse {
            id: question.id,
            status: "QUESTION CREATED".to_string(),
        }),
    ))
}

/// 列出全部问题
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<Vec<QuestionDetailsResponse>>, AppError> {
    let questions = state.question_service.list_all(&auth.user).await?;

    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

/// 列出某用户的问题
pub async fn list_questions_by_user(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, AppError> {
    let user_id = path_id(path, Resource::User)?;
    let questions = state
        .question_service
        .list_by_user(&auth.user, user_id)
        .await?;

    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

/// 编辑问题
pub async fn edit_question(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question_id = path_id(path, Resource::Question)?;
    let Json(req) = body?;
    let question = state
        .question_service
        .edit(&auth.user, question_id, req)
        .await?;

    Ok(Json(QuestionResponse {
        id: question.id,
        status: "QUESTION EDITED".to_string(),
    }))
}

/// 删除问题
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question_id = path_id(path, Resource::Question)?;
    let id = state
        .question_service
        .delete(&auth.user, question_id)
        .await?;

    Ok(Json(QuestionResponse {
        id,
        status: "QUESTION DELETED".to_string(),
    }))
}
