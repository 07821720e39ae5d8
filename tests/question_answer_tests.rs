//! 问题、回答与管理员操作的服务层测试

use quora_backend::{
    error::{AppError, Resource},
    models::{answer::AnswerRequest, question::QuestionRequest},
};
use uuid::Uuid;

mod common;
use common::{create_test_admin, create_test_app_state, create_test_user, sign_in};

fn question(content: &str) -> QuestionRequest {
    QuestionRequest {
        content: content.to_string(),
    }
}

fn answer(text: &str) -> AnswerRequest {
    AnswerRequest {
        answer: text.to_string(),
    }
}

#[tokio::test]
async fn test_author_edits_and_others_are_forbidden() {
    let state = create_test_app_state();
    create_test_user(&state, "alice", "pw1").await;
    create_test_user(&state, "bob", "pw2").await;

    let alice_token = sign_in(&state, "alice", "pw1").await;
    let alice = state.auth_service.authorize(&alice_token).await.unwrap();

    let q1 = state
        .question_service
        .create(&alice, question("Q1"))
        .await
        .unwrap();

    let edited = state
        .question_service
        .edit(&alice, q1.id, question("Q1 (edited)"))
        .await
        .unwrap();
    assert_eq!(edited.content, "Q1 (edited)");

    let bob_token = sign_in(&state, "bob", "pw2").await;
    let bob = state.auth_service.authorize(&bob_token).await.unwrap();

    let err = state
        .question_service
        .edit(&bob, q1.id, question("hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let all = state.question_service.list_all(&bob).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].content, "Q1 (edited)");
}

#[tokio::test]
async fn test_admin_cannot_edit_others_question() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let admin = create_test_admin(&state, "root", "pw1").await;

    let q1 = state
        .question_service
        .create(&alice, question("Q1"))
        .await
        .unwrap();

    let err = state
        .question_service
        .edit(&admin, q1.id, question("admin edit"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_question_delete_permissions() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;
    let admin = create_test_admin(&state, "root", "pw3").await;

    let first = state.question_service.create(&alice, question("Q1")).await.unwrap();
    let second = state.question_service.create(&alice, question("Q2")).await.unwrap();

    // 非作者非管理员
    let err = state.question_service.delete(&bob, first.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // 作者
    assert_eq!(
        state.question_service.delete(&alice, first.id).await.unwrap(),
        first.id
    );

    // 管理员
    assert_eq!(
        state.question_service.delete(&admin, second.id).await.unwrap(),
        second.id
    );

    assert!(state.question_service.list_all(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_question_is_not_found() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let missing = Uuid::new_v4();

    let err = state
        .question_service
        .edit(&alice, missing, question("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Question)));

    let err = state.question_service.delete(&alice, missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Question)));

    let err = state
        .answer_service
        .create(&alice, missing, answer("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Question)));
}

#[tokio::test]
async fn test_questions_by_user() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;

    state.question_service.create(&alice, question("A1")).await.unwrap();
    state.question_service.create(&alice, question("A2")).await.unwrap();
    state.question_service.create(&bob, question("B1")).await.unwrap();

    let alices = state.question_service.list_by_user(&bob, alice.id).await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|q| q.user_id == alice.id));

    let err = state
        .question_service
        .list_by_user(&bob, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::User)));
}

#[tokio::test]
async fn test_empty_question_rejected() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;

    let err = state
        .question_service
        .create(&alice, question(""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_answer_lifecycle_and_permissions() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;
    let admin = create_test_admin(&state, "root", "pw3").await;

    let q1 = state.question_service.create(&alice, question("Q1")).await.unwrap();
    let a1 = state
        .answer_service
        .create(&bob, q1.id, answer("first"))
        .await
        .unwrap();
    let a2 = state
        .answer_service
        .create(&alice, q1.id, answer("second"))
        .await
        .unwrap();

    let (listed_question, answers) = state
        .answer_service
        .list_for_question(&alice, q1.id)
        .await
        .unwrap();
    assert_eq!(listed_question.content, "Q1");
    assert_eq!(answers.len(), 2);

    // 仅作者可编辑
    let err = state
        .answer_service
        .edit(&alice, a1.id, answer("not mine"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let edited = state
        .answer_service
        .edit(&bob, a1.id, answer("first, revised"))
        .await
        .unwrap();
    assert_eq!(edited.answer, "first, revised");
    assert!(edited.updated_at >= a1.updated_at);

    // 作者或管理员可删除
    let err = state.answer_service.delete(&bob, a2.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    state.answer_service.delete(&admin, a2.id).await.unwrap();
    state.answer_service.delete(&bob, a1.id).await.unwrap();

    let err = state.answer_service.delete(&bob, a1.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Answer)));
}

#[tokio::test]
async fn test_deleting_question_removes_answers() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;

    let q1 = state.question_service.create(&alice, question("Q1")).await.unwrap();
    let a1 = state
        .answer_service
        .create(&bob, q1.id, answer("A1"))
        .await
        .unwrap();

    state.question_service.delete(&alice, q1.id).await.unwrap();

    let err = state.answer_service.delete(&bob, a1.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Answer)));
}

#[tokio::test]
async fn test_delete_user_requires_admin() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;
    let admin = create_test_admin(&state, "root", "pw3").await;

    let err = state.user_service.delete_user(&bob, alice.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = state
        .user_service
        .delete_user(&admin, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::User)));
}

#[tokio::test]
async fn test_deleted_user_loses_sessions_and_content() {
    let state = create_test_app_state();
    let alice = create_test_user(&state, "alice", "pw1").await;
    let bob = create_test_user(&state, "bob", "pw2").await;
    let admin = create_test_admin(&state, "root", "pw3").await;

    let alice_token = sign_in(&state, "alice", "pw1").await;
    let q1 = state.question_service.create(&alice, question("Q1")).await.unwrap();
    state
        .answer_service
        .create(&bob, q1.id, answer("A1"))
        .await
        .unwrap();

    assert_eq!(
        state.user_service.delete_user(&admin, alice.id).await.unwrap(),
        alice.id
    );

    let err = state.auth_service.authorize(&alice_token).await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound));

    assert!(state.question_service.list_all(&bob).await.unwrap().is_empty());

    let err = state.user_service.get_profile(&bob, alice.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::User)));

    // 用户名释放后可重新注册
    create_test_user(&state, "alice", "pw1").await;
}
