//! Session repository (会话数据访问)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::SessionRepository;
use crate::{error::AppError, models::session::Session};

pub struct PgSessionRepository {
    db: PgPool,
}

impl PgSessionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    /// 存储会话
    async fn create(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (id, user_id, token_hash, login_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.token_hash)
        .bind(session.login_at)
        .bind(session.expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// 根据哈希查找会话
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let session =
            sqlx::query_as::<_, Session>("SELECT * FROM user_sessions WHERE token_hash = $1")
                .bind(token_hash)
                .fetch_optional(&self.db)
                .await?;

        Ok(session)
    }

    /// 删除会话
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<Option<Uuid>, AppError> {
        let row = sqlx::query("DELETE FROM user_sessions WHERE token_hash = $1 RETURNING user_id")
            .bind(token_hash)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(|r| r.get::<Uuid, _>("user_id")))
    }

    /// 清理过期会话
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at < $1")
            .bind(now)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
