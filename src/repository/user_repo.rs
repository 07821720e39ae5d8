//! User repository (数据库访问层)

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::UserRepository;
use crate::{db, error::AppError, models::user::User};

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// 将唯一约束冲突映射为业务错误
fn map_insert_error(e: sqlx::Error) -> AppError {
    let conflict = match db::unique_violation(&e) {
        Some(USERNAME_CONSTRAINT) => Some(AppError::UsernameTaken),
        Some(EMAIL_CONSTRAINT) => Some(AppError::EmailTaken),
        _ => None,
    };
    conflict.unwrap_or_else(|| AppError::Database(e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据用户名查找用户
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 创建用户
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, username, email, first_name, last_name, dob, country, about_me,
                contact_number, role, password_hash, salt, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.dob)
        .bind(&user.country)
        .bind(&user.about_me)
        .bind(&user.contact_number)
        .bind(&user.role)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)
    }

    /// 删除用户
    ///
    /// 在一个事务内清理会话、回答、问题后删除用户；任何一步失败都会回滚。
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            DELETE FROM answers
            WHERE user_id = $1
               OR question_id IN (SELECT id FROM questions WHERE user_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM questions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
