//! 注册、登录、登出与令牌校验测试

use chrono::{Duration, Utc};
use quora_backend::error::AppError;

mod common;
use common::{create_test_app_state, create_test_user, sign_in, signup_request};

#[tokio::test]
async fn test_sign_up_then_sign_in() {
    let state = create_test_app_state();
    let user = create_test_user(&state, "alice", "pw1").await;

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "nonadmin");
    assert_ne!(user.password_hash, "pw1");

    let signed_in = state.auth_service.sign_in("alice", "pw1").await.unwrap();
    assert_eq!(signed_in.user.id, user.id);
    assert!(!signed_in.access_token.is_empty());

    let resolved = state
        .auth_service
        .authorize(&signed_in.access_token)
        .await
        .unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let err = state
        .user_service
        .sign_up(signup_request("alice", "other@example.com", "pw2"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UsernameTaken));
}

#[tokio::test]
async fn test_concurrent_duplicate_username_yields_one_conflict() {
    let state = create_test_app_state();

    let (first, second) = tokio::join!(
        state
            .user_service
            .sign_up(signup_request("alice", "alice1@example.com", "pw1")),
        state
            .user_service
            .sign_up(signup_request("alice", "alice2@example.com", "pw1")),
    );

    let results = [first, second];
    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::UsernameTaken)))
        .count();

    assert_eq!(created, 1);
    assert_eq!(conflicts, 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected_case_insensitively() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let err = state
        .user_service
        .sign_up(signup_request("alice2", "ALICE@example.com", "pw1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmailTaken));
}

#[tokio::test]
async fn test_sign_up_validation() {
    let state = create_test_app_state();

    let bad_email = state
        .user_service
        .sign_up(signup_request("alice", "not-an-email", "pw1"))
        .await;
    assert!(matches!(bad_email, Err(AppError::Validation(_))));

    let bad_username = state
        .user_service
        .sign_up(signup_request("alice smith", "alice@example.com", "pw1"))
        .await;
    assert!(matches!(bad_username, Err(AppError::Validation(_))));

    let short_password = state
        .user_service
        .sign_up(signup_request("alice", "alice@example.com", "pw"))
        .await;
    assert!(matches!(short_password, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let unknown = state.auth_service.sign_in("nobody", "pw1").await.unwrap_err();
    let wrong = state.auth_service.sign_in("alice", "wrong").await.unwrap_err();

    assert!(matches!(unknown, AppError::InvalidCredentials));
    assert!(matches!(wrong, AppError::InvalidCredentials));
    assert_eq!(unknown.code(), wrong.code());
    assert_eq!(unknown.user_message(), wrong.user_message());
}

#[tokio::test]
async fn test_username_is_case_sensitive() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let err = state.auth_service.sign_in("ALICE", "pw1").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_token_valid_for_eight_hours() {
    let state = create_test_app_state();
    let user = create_test_user(&state, "alice", "pw1").await;

    let issued_at = Utc::now();
    let signed_in = state
        .auth_service
        .sign_in_at("alice", "pw1", issued_at)
        .await
        .unwrap();
    assert_eq!(signed_in.expires_at, issued_at + Duration::hours(8));

    let token = signed_in.access_token;

    let at_start = state.auth_service.authorize_at(&token, issued_at).await.unwrap();
    assert_eq!(at_start.id, user.id);

    let almost = issued_at + Duration::hours(8) - Duration::seconds(1);
    assert!(state.auth_service.authorize_at(&token, almost).await.is_ok());

    let at_expiry = issued_at + Duration::hours(8);
    assert!(state.auth_service.authorize_at(&token, at_expiry).await.is_ok());

    let after = issued_at + Duration::hours(8) + Duration::seconds(1);
    let err = state.auth_service.authorize_at(&token, after).await.unwrap_err();
    assert!(matches!(err, AppError::SessionExpired));
}

#[tokio::test]
async fn test_authorize_after_sign_out_is_session_not_found() {
    let state = create_test_app_state();
    let user = create_test_user(&state, "alice", "pw1").await;
    let token = sign_in(&state, "alice", "pw1").await;

    let signed_out = state.auth_service.sign_out(&token).await.unwrap();
    assert_eq!(signed_out, user.id);

    let err = state.auth_service.authorize(&token).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));

    // 重复登出
    let err = state.auth_service.sign_out(&token).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));
}

#[tokio::test]
async fn test_unknown_token_is_session_not_found() {
    let state = create_test_app_state();

    let err = state.auth_service.authorize("qa_not-a-real-token").await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));

    let err = state.auth_service.sign_out("qa_not-a-real-token").await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let laptop = sign_in(&state, "alice", "pw1").await;
    let phone = sign_in(&state, "alice", "pw1").await;
    assert_ne!(laptop, phone);

    state.auth_service.sign_out(&laptop).await.unwrap();

    assert!(state.auth_service.authorize(&laptop).await.is_err());
    assert!(state.auth_service.authorize(&phone).await.is_ok());
}

#[tokio::test]
async fn test_purge_expired_sessions() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    let stale = state
        .auth_service
        .sign_in_at("alice", "pw1", Utc::now() - Duration::hours(9))
        .await
        .unwrap()
        .access_token;
    let fresh = sign_in(&state, "alice", "pw1").await;

    assert_eq!(state.auth_service.purge_expired_sessions().await.unwrap(), 1);

    let err = state.auth_service.authorize(&stale).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));
    assert!(state.auth_service.authorize(&fresh).await.is_ok());
}

#[tokio::test]
async fn test_sign_in_trims_username_like_sign_up() {
    let state = create_test_app_state();
    let user = state
        .user_service
        .sign_up(signup_request(" alice ", "alice@example.com", "pw1"))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");

    let padded = state.auth_service.sign_in(" alice ", "pw1").await.unwrap();
    assert_eq!(padded.user.id, user.id);

    let plain = state.auth_service.sign_in("alice", "pw1").await.unwrap();
    assert_eq!(plain.user.id, user.id);
}

#[tokio::test]
async fn test_overlong_email_rejected() {
    let state = create_test_app_state();
    let domain = vec!["a".repeat(50); 4].join(".");
    let email = format!("alice@{}.example.com", domain);
    assert!(email.len() > 200 && email.len() < 254);

    let err = state
        .user_service
        .sign_up(signup_request("alice", &email, "pw1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_storage_constraint_reports_username_before_email() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;

    // 用户名与邮箱同时冲突
    let err = state
        .user_service
        .sign_up(signup_request("alice", "alice@example.com", "pw1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UsernameTaken));

    // 仅邮箱冲突
    let email_only = state
        .user_service
        .sign_up(signup_request("alice2", "alice@example.com", "pw1"))
        .await
        .unwrap_err();
    assert!(matches!(email_only, AppError::EmailTaken));
}
