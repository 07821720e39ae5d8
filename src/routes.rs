//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{handlers, middleware::AppState};

/// 请求体大小上限
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 认证路由（无需会话）
    let auth_routes = Router::new()
        .route("/user/signup", post(handlers::user::signup))
        .route("/user/signin", post(handlers::user::signin))
        .route("/user/signout", post(handlers::user::signout));

    // 需要会话的路由
    let authenticated_routes = Router::new()
        .route("/userprofile/{user_id}", get(handlers::common::user_profile))
        .route("/admin/user/{user_id}", delete(handlers::admin::delete_user))
        // 问题
        .route("/question/create", post(handlers::question::create_question))
        .route("/question/all", get(handlers::question::list_questions))
        .route(
            "/question/all/{user_id}",
            get(handlers::question::list_questions_by_user),
        )
        .route(
            "/question/edit/{question_id}",
            put(handlers::question::edit_question),
        )
        .route(
            "/question/delete/{question_id}",
            delete(handlers::question::delete_question),
        )
        // 回答
        .route(
            "/question/{question_id}/answer/create",
            post(handlers::answer::create_answer),
        )
        .route("/answer/all/{question_id}", get(handlers::answer::list_answers))
        .route("/answer/edit/{answer_id}", put(handlers::answer::edit_answer))
        .route(
            "/answer/delete/{answer_id}",
            delete(handlers::answer::delete_answer),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::session_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(
                    crate::middleware::request_tracking_middleware,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
