//! 统一错误模型
//! 定义所有错误类型、错误码和错误响应格式

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 可能找不到的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Question,
    Answer,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => write!(f, "user"),
            Resource::Question => write!(f, "question"),
            Resource::Answer => write!(f, "answer"),
        }
    }
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("username already taken")]
    UsernameTaken,

    #[error("email already registered")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing or malformed credentials")]
    Unauthenticated,

    #[error("session not found")]
    SessionNotFound,

    #[error("session expired")]
    SessionExpired,

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(Resource),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UsernameTaken | AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::Unauthenticated
            | AppError::SessionNotFound
            | AppError::SessionExpired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取错误码（对外稳定）
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UsernameTaken => "SGR-001",
            AppError::EmailTaken => "SGR-002",
            AppError::InvalidCredentials => "ATH-001",
            AppError::Unauthenticated => "ATHR-000",
            AppError::SessionNotFound => "ATHR-001",
            AppError::SessionExpired => "ATHR-002",
            AppError::Forbidden(_) => "ATHR-003",
            AppError::NotFound(Resource::User) => "USR-001",
            AppError::NotFound(Resource::Question) => "QUES-001",
            AppError::NotFound(Resource::Answer) => "ANS-001",
            AppError::Validation(_) => "REQ-001",
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => "SRV-001",
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::UsernameTaken => {
                "Try any other Username, this Username has already been taken".to_string()
            }
            AppError::EmailTaken => {
                "This user has already been registered, try with any other emailId".to_string()
            }
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::Unauthenticated => "Missing or malformed credentials".to_string(),
            AppError::SessionNotFound => "User has not signed in".to_string(),
            AppError::SessionExpired => "Session has expired, sign in again".to_string(),
            AppError::Forbidden(reason) => reason.to_string(),
            AppError::NotFound(resource) => {
                format!("Entered {} uuid does not exist", resource)
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// 错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub status: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // 与响应头 x-request-id 保持一致
        let request_id = crate::middleware::current_request_id()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                status: status.as_u16(),
                message: self.user_message(),
                request_id,
            },
        };

        // 服务端错误记 error，客户端错误记 warn
        if self.is_server_error() {
            tracing::error!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::warn!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 请求体无法解析为 JSON 或缺少字段
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

/// 从 validator::ValidationErrors 转换
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
