//! Question models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / edit question request
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 500))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionDetailsResponse {
    pub id: Uuid,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            content: question.content,
        }
    }
}
