//! Authorization gate
//!
//! Pure role/ownership checks. Callers resolve the target's author first and
//! pass it in with the action.

use uuid::Uuid;

use crate::{error::AppError, models::user::User};

/// Action an authenticated user attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateQuestion,
    EditQuestion { author: Uuid },
    DeleteQuestion { author: Uuid },
    ListQuestions,
    CreateAnswer,
    EditAnswer { author: Uuid },
    DeleteAnswer { author: Uuid },
    ListAnswers,
    ViewProfile,
    DeleteUser,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateQuestion => "create_question",
            Action::EditQuestion { .. } => "edit_question",
            Action::DeleteQuestion { .. } => "delete_question",
            Action::ListQuestions => "list_questions",
            Action::CreateAnswer => "create_answer",
            Action::EditAnswer { .. } => "edit_answer",
            Action::DeleteAnswer { .. } => "delete_answer",
            Action::ListAnswers => "list_answers",
            Action::ViewProfile => "view_profile",
            Action::DeleteUser => "delete_user",
        }
    }
}

/// Check whether `actor` may perform `action`
pub fn check_permission(actor: &User, action: Action) -> Result<(), &'static str> {
    match action {
        Action::CreateQuestion
        | Action::ListQuestions
        | Action::CreateAnswer
        | Action::ListAnswers
        | Action::ViewProfile => Ok(()),
        Action::EditQuestion { author } if author != actor.id => {
            Err("Only the question owner can edit the question")
        }
        Action::DeleteQuestion { author } if author != actor.id && !actor.is_admin() => {
            Err("Only the question owner or admin can delete the question")
        }
        Action::EditAnswer { author } if author != actor.id => {
            Err("Only the answer owner can edit the answer")
        }
        Action::DeleteAnswer { author } if author != actor.id && !actor.is_admin() => {
            Err("Only the answer owner or admin can delete the answer")
        }
        Action::DeleteUser if !actor.is_admin() => {
            Err("Unauthorized Access, Entered user is not an admin")
        }
        _ => Ok(()),
    }
}

/// 检查权限，如果无权限则返回错误
pub fn require_permission(actor: &User, action: Action) -> Result<(), AppError> {
    check_permission(actor, action).map_err(|reason| {
        tracing::warn!(
            user_id = %actor.id,
            action = action.name(),
            "Permission denied"
        );
        AppError::Forbidden(reason)
    })
}
