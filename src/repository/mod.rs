//! 数据访问层
//!
//! 每类实体一个 trait，Postgres 与内存两种实现。服务层只依赖 trait。

pub mod answer_repo;
pub mod memory;
pub mod question_repo;
pub mod session_repo;
pub mod user_repo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{self, HealthStatus},
    error::AppError,
    models::{answer::Answer, question::Question, session::Session, user::User},
};

pub use answer_repo::PgAnswerRepository;
pub use memory::MemoryStore;
pub use question_repo::PgQuestionRepository;
pub use session_repo::PgSessionRepository;
pub use user_repo::PgUserRepository;

/// 用户存储
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 插入用户；用户名或邮箱冲突时返回 UsernameTaken / EmailTaken
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// 删除用户及其会话、问题、回答；返回是否存在
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// 会话存储
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), AppError>;

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// 删除会话，返回所属用户
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<Option<Uuid>, AppError>;

    /// 清理 `now` 之前过期的会话
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

/// 问题存储
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: &Question) -> Result<Question, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, AppError>;

    async fn list_all(&self) -> Result<Vec<Question>, AppError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Question>, AppError>;

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError>;

    /// 删除问题及其回答
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// 回答存储
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn create(&self, answer: &Answer) -> Result<Answer, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AppError>;

    async fn list_by_question(&self, question_id: Uuid) -> Result<Vec<Answer>, AppError>;

    async fn update_content(
        &self,
        id: Uuid,
        answer: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// 所有存储的集合，构造时注入各服务
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pool: Option<PgPool>,
}

impl Repositories {
    /// Postgres 实现
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool.clone())),
            questions: Arc::new(PgQuestionRepository::new(pool.clone())),
            answers: Arc::new(PgAnswerRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// 内存实现（开发与测试）
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            sessions: store.clone(),
            questions: store.clone(),
            answers: store,
            pool: None,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// 存储健康检查
    pub async fn health_check(&self) -> HealthStatus {
        match &self.pool {
            Some(pool) => db::health_check(pool).await,
            None => HealthStatus::Healthy,
        }
    }
}
