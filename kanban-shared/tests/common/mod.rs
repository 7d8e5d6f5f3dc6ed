//! Shared helpers for kanban-shared integration tests
//!
//! Every test gets its own in-memory SQLite database with the schema applied,
//! so tests never see each other's data.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use kanban_shared::db::migrations::run_migrations;
use kanban_shared::db::pool::{create_pool, DatabaseConfig};
use kanban_shared::service::KanbanService;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const PASSWORD: &str = "Secret123";

/// Fresh migrated in-memory database
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Service over a fresh database, plus the pool for reloading
pub async fn test_service() -> (SqlitePool, KanbanService) {
    let pool = test_pool().await;
    let service = KanbanService::new(pool.clone());
    (pool, service)
}

/// Unique, valid email address
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4().simple())
}

/// Registers (and thereby logs in) a new user, returning their email
pub async fn registered_user(service: &mut KanbanService) -> String {
    let email = unique_email();
    let response = service.register(&email, PASSWORD).await;
    assert!(response.is_ok(), "register failed: {:?}", response.error_message);
    email
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Error message of a failed response, panicking on success
pub fn error_of<T: std::fmt::Debug>(response: kanban_shared::service::Response<T>) -> String {
    match response.error_message {
        Some(message) => message,
        None => panic!("expected an error, got {:?}", response.return_value),
    }
}
