//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use kanban_api::{app::AppState, config::Config};
//! use kanban_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = create_pool(DatabaseConfig {
//!     url: config.database.url.clone(),
//!     ..DatabaseConfig::default()
//! })
//! .await?;
//! let state = AppState::new(pool, config);
//! let app = kanban_api::app::build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use kanban_shared::service::KanbanService;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// service keeps the whole model in memory, so requests are serialized
/// through one lock.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Boards, users and sessions
    pub service: Arc<Mutex<KanbanService>>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state with an empty service
    ///
    /// Call [`KanbanService::load_data`] through [`AppState::service`] to
    /// populate it from storage.
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            service: Arc::new(Mutex::new(KanbanService::new(db.clone()))),
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// └── /v1/
///     ├── /users/     register, login, logout
///     ├── /boards/    create, delete, list, name, join, leave, owner, view
///     ├── /columns/   limit, limit/get, name, tasks
///     ├── /tasks/     create, in-progress, delete, advance, assign,
///     │               title, description, due-date
///     └── /admin/     load, reset
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login))
        .route("/logout", post(routes::users::logout));

    let board_routes = Router::new()
        .route(
            "/",
            post(routes::boards::create_board).get(routes::boards::list_user_boards),
        )
        .route("/delete", post(routes::boards::delete_board))
        .route("/owner", post(routes::boards::change_owner))
        .route("/view", post(routes::boards::get_board))
        .route("/:board_id/name", get(routes::boards::get_board_name))
        .route("/:board_id/join", post(routes::boards::join_board))
        .route("/:board_id/leave", post(routes::boards::leave_board));

    let column_routes = Router::new()
        .route("/limit", post(routes::columns::limit_column))
        .route("/limit/get", post(routes::columns::get_column_limit))
        .route("/name", post(routes::columns::get_column_name))
        .route("/tasks", post(routes::columns::get_column));

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/in-progress", get(routes::tasks::in_progress_tasks))
        .route("/delete", post(routes::tasks::delete_task))
        .route("/advance", post(routes::tasks::advance_task))
        .route("/assign", post(routes::tasks::assign_task))
        .route("/title", post(routes::tasks::edit_title))
        .route("/description", post(routes::tasks::edit_description))
        .route("/due-date", post(routes::tasks::edit_due_date));

    let admin_routes = Router::new()
        .route("/load", post(routes::admin::load_data))
        .route("/reset", post(routes::admin::delete_data));

    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/boards", board_routes)
        .nest("/columns", column_routes)
        .nest("/tasks", task_routes)
        .nest("/admin", admin_routes);

    let cors = match state.config.cors_origin_list() {
        None => CorsLayer::permissive(),
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(std::time::Duration::from_secs(3600))
        }
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
