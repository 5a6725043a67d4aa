mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use std::time::Duration;
use user_directory::api::handlers::list_users_handler;

fn app(state: user_directory::AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_list_users_returns_seeded_records(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/api/users").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let users = json.as_array().unwrap();

    assert_eq!(users.len(), common::SEEDED_USER_COUNT);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[0]["name"], "User 1");
    assert_eq!(users[0]["email"], "user1@example.com");
}

#[sqlx::test]
async fn test_second_call_is_served_from_cache(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(app(state)).unwrap();

    let first = server.get("/api/users").await;
    first.assert_status_ok();
    let first_count = first.json::<serde_json::Value>().as_array().unwrap().len();

    // A row added after the first request must not show up while the cached
    // listing is still fresh.
    common::create_test_user(&pool, "Late Arrival", "late@example.com").await;

    let second = server.get("/api/users").await;
    second.assert_status_ok();
    let second_count = second.json::<serde_json::Value>().as_array().unwrap().len();

    assert_eq!(first_count, common::SEEDED_USER_COUNT);
    assert_eq!(second_count, first_count);
}

#[sqlx::test]
async fn test_expired_cache_entry_refetches_from_store(pool: PgPool) {
    let state = common::create_test_state_with_expiration(pool.clone(), Duration::from_millis(20));
    let server = TestServer::new(app(state)).unwrap();

    let first = server.get("/api/users").await;
    first.assert_status_ok();

    common::create_test_user(&pool, "Late Arrival", "late@example.com").await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    let second = server.get("/api/users").await;
    second.assert_status_ok();
    let second_count = second.json::<serde_json::Value>().as_array().unwrap().len();

    assert_eq!(second_count, common::SEEDED_USER_COUNT + 1);
}

#[sqlx::test]
async fn test_response_shape(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/api/users").await;
    let json = response.json::<serde_json::Value>();
    let user = &json.as_array().unwrap()[0];

    assert!(user.get("id").is_some());
    assert!(user.get("name").is_some());
    assert!(user.get("email").is_some());
}
