//! 回答的 HTTP 处理器

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
    models::answer::{AnswerDetailsResponse, AnswerRequest, AnswerResponse},
};

/// 回答问题
pub async fn create_answer(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let question_id = path_id(path, Resource::Question)?;
    let Json(req) = body?;
    let answer = state
        .answer_service
        .create(&auth.user, question_id, req)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnswerResponse {
            id: answer.id,
            status: "ANSWER CREATED".to_string(),
        }),
    ))
}

/// 列出问题下的全部回答
pub async fn list_answers(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<AnswerDetailsResponse>>, AppError> {
    let question_id = path_id(path, Resource::Question)?;
    let (question, answers) = state
        .answer_service
        .list_for_question(&auth.user, question_id)
        .await?;

    let details = answers
        .into_iter()
        .map(|answer| AnswerDetailsResponse {
            id: answer.id,
            question_content: question.content.clone(),
            answer_content: answer.answer,
        })
        .collect();

    Ok(Json(details))
}

/// 编辑回答
pub async fn edit_answer(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, AppError> {
    let answer_id = path_id(path, Resource::Answer)?;
    let Json(req) = body?;
    let answer = state.answer_service.edit(&auth.user, answer_id, req).await?;

    Ok(Json(AnswerResponse {
        id: answer.id,
        status: "ANSWER EDITED".to_string(),
    }))
}

/// 删除回答
pub async fn delete_answer(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AnswerResponse>, AppError> {
    let answer_id = path_id(path, Resource::Answer)?;
    let id = state.answer_service.delete(&auth.user, answer_id).await?;

    Ok(Json(AnswerResponse {
        id,
        status: "ANSWER DELETED".to_string(),
    }))
}
