//! Answer repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::AnswerRepository;
use crate::{error::AppError, models::answer::Answer};

pub struct PgAnswerRepository {
    db: PgPool,
}

impl PgAnswerRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnswerRepository for PgAnswerRepository {
    async fn create(&self, answer: &Answer) -> Result<Answer, AppError> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (id, answer, question_id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(answer.id)
        .bind(&answer.answer)
        .bind(answer.question_id)
        .bind(answer.user_id)
        .bind(answer.created_at)
        .bind(answer.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(answer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AppError> {
        let answer = sqlx::query_as::<_, Answer>("SELECT * FROM answers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(answer)
    }

    async fn list_by_question(&self, question_id: Uuid) -> Result<Vec<Answer>, AppError> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT * FROM answers WHERE question_id = $1 ORDER BY created_at, id",
        )
        .bind(question_id)
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }

    async fn update_content(
        &self,
        id: Uuid,
        answer: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AppError> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            UPDATE answers
            SET answer = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(answer)
        .bind(updated_at)
        .fetch_optional(&self.db)
        .await?;

        Ok(answer)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
