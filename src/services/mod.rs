//! Business logic services layer

pub mod answer_service;
pub mod auth_service;
pub mod question_service;
pub mod user_service;

pub use answer_service::AnswerService;
pub use auth_service::AuthService;
pub use question_service::QuestionService;
pub use user_service::UserService;
