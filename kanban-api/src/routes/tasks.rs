//! Task endpoints
//!
//! A task is addressed by board name and task id. Deleting, advancing and
//! assigning also name the column the task is expected in.
//!
//! - `POST /v1/tasks` - Add a task to the backlog
//! - `GET  /v1/tasks/in-progress?email=` - The caller's in-progress tasks
//! - `POST /v1/tasks/delete` - Remove a task
//! - `POST /v1/tasks/advance` - Move a task to the next column
//! - `POST /v1/tasks/assign` - Assign a task to a member
//! - `POST /v1/tasks/title` - Change the title
//! - `POST /v1/tasks/description` - Change the description
//! - `POST /v1/tasks/due-date` - Change the due date

use crate::{
    app::AppState,
    error::{envelope, ApiResult},
    routes::boards::EmailQuery,
};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use kanban_shared::service::{Response, TaskView};
use serde::Deserialize;
use validator::Validate;

/// Create task request
///
/// ```json
/// {
///   "email": "user@example.com",
///   "board_name": "sprint",
///   "title": "Write docs",
///   "description": "",
///   "due_date": "2026-12-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// RFC 3339 timestamp
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub column: i64,

    pub task_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignTaskRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub column: i64,

    pub task_id: i64,

    /// Member receiving the task
    #[validate(length(min = 1, message = "Assignee is required"))]
    pub assignee: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditTitleRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub task_id: i64,

    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditDescriptionRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub task_id: i64,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditDueDateRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub task_id: i64,

    pub due_date: DateTime<Utc>,
}

/// Create a task in the backlog
///
/// Returns the new task, including its id, as `ReturnValue`.
///
/// # Errors
///
/// - `400 Bad Request`: Bad title, description or due date
/// - `409 Conflict`: Backlog is full
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Response<TaskView>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .create_task(
                &req.email,
                &req.board_name,
                &req.title,
                &req.description,
                req.due_date,
            )
            .await,
    )
}

pub async fn in_progress_tasks(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Response<Vec<TaskView>>>> {
    query.validate()?;

    let service = state.service.lock().await;
    envelope(service.in_progress_tasks(&query.email))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .delete_task(&req.email, &req.board_name, req.column, req.task_id)
            .await,
    )
}

/// Move a task one column forward
///
/// # Errors
///
/// - `403 Forbidden`: The task is assigned to someone else
/// - `409 Conflict`: Already done, or the next column is full
pub async fn advance_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .advance_task(&req.email, &req.board_name, req.column, req.task_id)
            .await,
    )
}

/// Assign a task
///
/// Unassigned tasks may be taken by any member; assigned ones can only be
/// handed over by their assignee.
pub async fn assign_task(
    State(state): State<AppState>,
    Json(req): Json<AssignTaskRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .assign_task(
                &req.email,
                &req.board_name,
                req.column,
                req.task_id,
                &req.assignee,
            )
            .await,
    )
}

pub async fn edit_title(
    State(state): State<AppState>,
    Json(req): Json<EditTitleRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .edit_task_title(
                &req.email,
                &req.board_name,
                req.task_id,
                &req.title,
            )
            .await,
    )
}

pub async fn edit_description(
    State(state): State<AppState>,
    Json(req): Json<EditDescriptionRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .edit_task_description(
                &req.email,
                &req.board_name,
                req.task_id,
                &req.description,
            )
            .await,
    )
}

pub async fn edit_due_date(
    State(state): State<AppState>,
    Json(req): Json<EditDueDateRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .edit_task_due_date(
                &req.email,
                &req.board_name,
                req.task_id,
                req.due_date,
            )
            .await,
    )
}
