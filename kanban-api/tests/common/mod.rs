//! Common test utilities for API integration tests
//!
//! Each [`TestContext`] runs the full router over its own in-memory SQLite
//! database, so tests are independent of each other and of the environment.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use kanban_api::app::{build_router, AppState};
use kanban_api::config::Config;
use kanban_shared::db::migrations::run_migrations;
use kanban_shared::db::pool::{create_pool, DatabaseConfig};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "Secret123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::default();

        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Self { db, app, config })
    }

    /// Sends a POST with a JSON body, returning status and parsed body
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Sends a GET, returning status and parsed body
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("non-JSON body: {}", String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }

    /// Registers a fresh user, who is logged in afterwards
    pub async fn register_user(&self) -> String {
        let email = format!("test-{}@example.com", Uuid::new_v4().simple());
        let (status, body) = self
            .post(
                "/v1/users/register",
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        email
    }

    /// Creates a board owned by `email` and returns its id
    pub async fn create_board(&self, email: &str, board_name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/v1/boards",
                json!({ "email": email, "board_name": board_name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create board failed: {}", body);
        body["ReturnValue"]["Id"].as_i64().unwrap()
    }

    /// Creates a backlog task due in a week and returns its id
    pub async fn create_task(&self, email: &str, board_name: &str, title: &str) -> i64 {
        let (status, body) = self
            .post(
                "/v1/tasks",
                json!({
                    "email": email,
                    "board_name": board_name,
                    "title": title,
                    "description": "",
                    "due_date": (Utc::now() + Duration::days(7)).to_rfc3339(),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create task failed: {}", body);
        body["ReturnValue"]["Id"].as_i64().unwrap()
    }
}
