//! Answer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub answer: String,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / edit answer request
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerRequest {
    #[serde(alias = "content")]
    #[validate(length(min = 1, max = 8000))]
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub status: String,
}

/// Answer listed together with the question it belongs to
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerDetailsResponse {
    pub id: Uuid,
    pub question_content: String,
    pub answer_content: String,
}
