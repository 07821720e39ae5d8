//! 数据模型模块
//! 用户、会话、问题与回答

pub mod answer;
pub mod auth;
pub mod question;
pub mod session;
pub mod user;
