use axum::http::StatusCode;
use serde_json::json;
use sqlx::Row;

use super::{body_json, setup_test_app};

async fn user_count(state: &crate::state::AppState) -> i64 {
    sqlx::query("SELECT COUNT(*) AS count FROM users")
        .fetch_one(&state.db)
        .await
        .unwrap()
        .get("count")
}

#[tokio::test]
async fn register_creates_user() {
    let t = setup_test_app().await;

    let response = t
        .post_json(
            "/api/auth/register",
            json!({"username": "alice", "email": "alice@example.com", "password": "pw1"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(user_count(&t.state).await, 1);
}

#[tokio::test]
async fn register_twice_with_same_email_conflicts() {
    let t = setup_test_app().await;

    let first = t
        .post_json(
            "/api/auth/register",
            json!({"username": "alice", "email": "alice@example.com", "password": "pw1"}),
        )
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = t
        .post_json(
            "/api/auth/register",
            json!({"username": "alice2", "email": "alice@example.com", "password": "pw2"}),
        )
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["message"], "User already exists");

    // the failed insert must not have created a row
    assert_eq!(user_count(&t.state).await, 1);
}

#[tokio::test]
async fn register_with_missing_fields_is_bad_request() {
    let t = setup_test_app().await;

    let response = t
        .post_json(
            "/api/auth/register",
            json!({"username": "", "email": "x@example.com", "password": "pw"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(user_count(&t.state).await, 0);
}

#[tokio::test]
async fn login_returns_user_without_password_hash() {
    let t = setup_test_app().await;

    t.post_json(
        "/api/auth/register",
        json!({"username": "bob", "email": "bob@example.com", "password": "hunter2"}),
    )
    .await;

    let response = t
        .post_json(
            "/api/auth/login",
            json!({"identifier": "bob@example.com", "password": "hunter2"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], "bob");
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert!(body["user"]["id"].is_i64());
    // the hash must never appear in any serialized form
    assert!(body["user"].get("password").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let t = setup_test_app().await;

    t.post_json(
        "/api/auth/register",
        json!({"username": "bob", "email": "bob@example.com", "password": "hunter2"}),
    )
    .await;

    let response = t
        .post_json(
            "/api/auth/login",
            json!({"identifier": "bob@example.com", "password": "hunter3"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    let t = setup_test_app().await;

    let response = t
        .post_json(
            "/api/auth/login",
            json!({"identifier": "nobody@example.com", "password": "pw"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// The identifier field is matched against email only. A valid username is
// not accepted, even with the correct password.
#[tokio::test]
async fn login_with_username_as_identifier_is_rejected() {
    let t = setup_test_app().await;

    t.post_json(
        "/api/auth/register",
        json!({"username": "carol", "email": "carol@example.com", "password": "pw"}),
    )
    .await;

    let response =
        t.post_json("/api/auth/login", json!({"identifier": "carol", "password": "pw"})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_with_duplicate_username_conflicts() {
    let t = setup_test_app().await;

    t.post_json(
        "/api/auth/register",
        json!({"username": "dave", "email": "dave@example.com", "password": "pw"}),
    )
    .await;

    let response = t
        .post_json(
            "/api/auth/register",
            json!({"username": "dave", "email": "other@example.com", "password": "pw"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(user_count(&t.state).await, 1);
}
