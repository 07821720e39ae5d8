//! Question repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::QuestionRepository;
use crate::{error::AppError, models::question::Question};

pub struct PgQuestionRepository {
    db: PgPool,
}

impl PgQuestionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn create(&self, question: &Question) -> Result<Question, AppError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, content, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(question.id)
        .bind(&question.content)
        .bind(question.user_id)
        .bind(question.created_at)
        .bind(question.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(question)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(question)
    }

    async fn list_all(&self) -> Result<Vec<Question>, AppError> {
        let questions =
            sqlx::query_as::<_, Question>("SELECT * FROM questions ORDER BY created_at, id")
                .fetch_all(&self.db)
                .await?;

        Ok(questions)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(questions)
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET content = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(updated_at)
        .fetch_optional(&self.db)
        .await?;

        Ok(question)
    }

    /// 删除问题，回答在同一事务内删除
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
