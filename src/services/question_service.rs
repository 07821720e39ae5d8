//! 问题服务

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::permission::{require_permission, Action},
    error::{AppError, Resource},
    models::{
        question::{Question, QuestionRequest},
        user::User,
    },
    repository::Repositories,
};

pub struct QuestionService {
    repos: Repositories,
}

impl QuestionService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, actor: &User, req: QuestionRequest) -> Result<Question, AppError> {
        require_permission(actor, Action::CreateQuestion)?;
        req.validate()?;

        let now = Utc::now();
        let question = self
            .repos
            .questions
            .create(&Question {
                id: Uuid::new_v4(),
                content: req.content,
                user_id: actor.id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(question_id = %question.id, user_id = %actor.id, "Question created");

        Ok(question)
    }

    pub async fn list_all(&self, actor: &User) -> Result<Vec<Question>, AppError> {
        require_permission(actor, Action::ListQuestions)?;

        self.repos.questions.list_all().await
    }

    /// 某个用户提出的全部问题
    pub async fn list_by_user(&self, actor: &User, user_id: Uuid) -> Result<Vec<Question>, AppError> {
        require_permission(actor, Action::ListQuestions)?;

        if self.repos.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(Resource::User));
        }

        self.repos.questions.list_by_user(user_id).await
    }

    /// 编辑问题（仅作者）
    pub async fn edit(
        &self,
        actor: &User,
        question_id: Uuid,
        req: QuestionRequest,
    ) -> Result<Question, AppError> {
        let existing = self.find(question_id).await?;
        require_permission(actor, Action::EditQuestion { author: existing.user_id })?;
        req.validate()?;

        let question = self
            .repos
            .questions
            .update_content(question_id, &req.content, Utc::now())
            .await?
            .ok_or(AppError::NotFound(Resource::Question))?;

        tracing::info!(question_id = %question_id, user_id = %actor.id, "Question edited");

        Ok(question)
    }

    /// 删除问题（作者或管理员）
    pub async fn delete(&self, actor: &User, question_id: Uuid) -> Result<Uuid, AppError> {
        let existing = self.find(question_id).await?;
        require_permission(actor, Action::DeleteQuestion { author: existing.user_id })?;

        if !self.repos.questions.delete(question_id).await? {
            return Err(AppError::NotFound(Resource::Question));
        }

        tracing::info!(question_id = %question_id, user_id = %actor.id, "Question deleted");

        Ok(question_id)
    }

    async fn find(&self, question_id: Uuid) -> Result<Question, AppError> {
        self.repos
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Question))
    }
}
