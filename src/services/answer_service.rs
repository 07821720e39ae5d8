//! 回答服务

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::permission::{require_permission, Action},
    error::{AppError, Resource},
    models::{
        answer::{Answer, AnswerRequest},
        question::Question,
        user::User,
    },
    repository::Repositories,
};

pub struct AnswerService {
    repos: Repositories,
}

impl AnswerService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        actor: &User,
        question_id: Uuid,
        req: AnswerRequest,
    ) -> Result<Answer, AppError> {
        require_permission(actor, Action::CreateAnswer)?;
        req.validate()?;

        let question = self.find_question(question_id).await?;

        let now = Utc::now();
        let answer = self
            .repos
            .answers
            .create(&Answer {
                id: Uuid::new_v4(),
                answer: req.answer,
                question_id: question.id,
                user_id: actor.id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(answer_id = %answer.id, question_id = %question.id, "Answer created");

        Ok(answer)
    }

    /// 问题及其全部回答
    pub async fn list_for_question(
        &self,
        actor: &User,
        question_id: Uuid,
    ) -> Result<(Question, Vec<Answer>), AppError> {
        require_permission(actor, Action::ListAnswers)?;

        let question = self.find_question(question_id).await?;
        let answers = self.repos.answers.list_by_question(question_id).await?;

        Ok((question, answers))
    }

    /// 编辑回答（仅作者）
    pub async fn edit(
        &self,
        actor: &User,
        answer_id: Uuid,
        req: AnswerRequest,
    ) -> Result<Answer, AppError> {
        let existing = self.find(answer_id).await?;
        require_permission(actor, Action::EditAnswer { author: existing.user_id })?;
        req.validate()?;

        let answer = self
            .repos
            .answers
            .update_content(answer_id, &req.answer, Utc::now())
            .await?
            .ok_or(AppError::NotFound(Resource::Answer))?;

        tracing::info!(answer_id = %answer_id, user_id = %actor.id, "Answer edited");

        Ok(answer)
    }

    /// 删除回答（作者或管理员）
    pub async fn delete(&self, actor: &User, answer_id: Uuid) -> Result<Uuid, AppError> {
        let existing = self.find(answer_id).await?;
        require_permission(actor, Action::DeleteAnswer { author: existing.user_id })?;

        if !self.repos.answers.delete(answer_id).await? {
            return Err(AppError::NotFound(Resource::Answer));
        }

        tracing::info!(answer_id = %answer_id, user_id = %actor.id, "Answer deleted");

        Ok(answer_id)
    }

    async fn find(&self, answer_id: Uuid) -> Result<Answer, AppError> {
        self.repos
            .answers
            .find_by_id(answer_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Answer))
    }

    async fn find_question(&self, question_id: Uuid) -> Result<Question, AppError> {
        self.repos
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Question))
    }
}
