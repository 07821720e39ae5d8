//! 应用状态与 HTTP 中间件
//! 请求追踪、指标记录

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::{PasswordHasher, TokenIssuer},
    config::AppConfig,
    error::AppError,
    repository::Repositories,
    services::{AnswerService, AuthService, QuestionService, UserService},
};

/// 应用状态
///
/// 所有协作者在启动时显式构造并注入，服务之间共享同一组存储。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repos: Repositories,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub answer_service: Arc<AnswerService>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::from_config(&config.security)?);
        let issuer = TokenIssuer::from_config(&config.security);

        Ok(Self {
            auth_service: Arc::new(AuthService::new(repos.clone(), hasher.clone(), issuer)),
            user_service: Arc::new(UserService::new(
                repos.clone(),
                hasher,
                config.security.clone(),
            )),
            question_service: Arc::new(QuestionService::new(repos.clone())),
            answer_service: Arc::new(AnswerService::new(repos.clone())),
            repos,
            config,
        })
    }
}

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 当前请求的 request_id（仅在请求追踪中间件内可用）
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 指标标签使用静态字符串
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            _ => "OTHER",
        };
        let status_class = match status {
            200..=299 => "2xx",
            400..=499 => "4xx",
            500..=599 => "5xx",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_class)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中添加 trace_id / request_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
