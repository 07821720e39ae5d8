//! In-memory storage backend
//!
//! Implements every repository trait over a single `RwLock`, so uniqueness
//! checks and multi-table deletes happen atomically under one write guard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnswerRepository, QuestionRepository, SessionRepository, UserRepository};
use crate::{
    error::AppError,
    models::{answer::Answer, question::Question, session::Session, user::User},
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    sessions: HashMap<String, Session>,
    questions: HashMap<Uuid, Question>,
    answers: HashMap<Uuid, Answer>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> (DateTime<Utc>, Uuid),
{
    items.sort_by_key(key);
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.username == user.username) {
            return Err(AppError::UsernameTaken);
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::EmailTaken);
        }

        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;

        if state.users.remove(&id).is_none() {
            return Ok(false);
        }

        state.sessions.retain(|_, s| s.user_id != id);

        let owned_questions: Vec<Uuid> = state
            .questions
            .values()
            .filter(|q| q.user_id == id)
            .map(|q| q.id)
            .collect();
        state
            .answers
            .retain(|_, a| a.user_id != id && !owned_questions.contains(&a.question_id));
        state.questions.retain(|_, q| q.user_id != id);

        Ok(true)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> Result<(), AppError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&session.user_id) {
            return Err(AppError::Internal(format!(
                "session references unknown user {}",
                session.user_id
            )));
        }

        state
            .sessions
            .insert(session.token_hash.clone(), session.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(self.state.read().await.sessions.get(token_hash).cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<Option<Uuid>, AppError> {
        let mut state = self.state.write().await;
        Ok(state.sessions.remove(token_hash).map(|s| s.user_id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at >= now);
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn create(&self, question: &Question) -> Result<Question, AppError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&question.user_id) {
            return Err(AppError::Internal(format!(
                "question references unknown user {}",
                question.user_id
            )));
        }

        state.questions.insert(question.id, question.clone());
        Ok(question.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, AppError> {
        Ok(self.state.read().await.questions.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Question>, AppError> {
        let state = self.state.read().await;
        let questions = state.questions.values().cloned().collect();
        Ok(sorted_by_creation(questions, |q: &Question| (q.created_at, q.id)))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Question>, AppError> {
        let state = self.state.read().await;
        let questions = state
            .questions
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(questions, |q: &Question| (q.created_at, q.id)))
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, AppError> {
        let mut state = self.state.write().await;
        Ok(state.questions.get_mut(&id).map(|q| {
            q.content = content.to_string();
            q.updated_at = updated_at;
            q.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;

        if state.questions.remove(&id).is_none() {
            return Ok(false);
        }
        state.answers.retain(|_, a| a.question_id != id);

        Ok(true)
    }
}

#[async_trait]
impl AnswerRepository for MemoryStore {
    async fn create(&self, answer: &Answer) -> Result<Answer, AppError> {
        let mut state = self.state.write().await;

        if !state.questions.contains_key(&answer.question_id) {
            return Err(AppError::Internal(format!(
                "answer references unknown question {}",
                answer.question_id
            )));
        }

        state.answers.insert(answer.id, answer.clone());
        Ok(answer.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AppError> {
        Ok(self.state.read().await.answers.get(&id).cloned())
    }

    async fn list_by_question(&self, question_id: Uuid) -> Result<Vec<Answer>, AppError> {
        let state = self.state.read().await;
        let answers = state
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        Ok(sorted_by_creation(answers, |a: &Answer| (a.created_at, a.id)))
    }

    async fn update_content(
        &self,
        id: Uuid,
        answer: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AppError> {
        let mut state = self.state.write().await;
        Ok(state.answers.get_mut(&id).map(|a| {
            a.answer = answer.to_string();
            a.updated_at = updated_at;
            a.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        Ok(state.answers.remove(&id).is_some())
    }
}
