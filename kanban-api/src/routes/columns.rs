//! Column endpoints
//!
//! Columns are addressed by index: 0 backlog, 1 in progress, 2 done.
//!
//! - `POST /v1/columns/limit` - Set a column's task limit (-1 for none)
//! - `POST /v1/columns/limit/get` - Read a column's task limit
//! - `POST /v1/columns/name` - Name of a column
//! - `POST /v1/columns/tasks` - Tasks in a column, by id

use crate::{
    app::AppState,
    error::{envelope, ApiResult},
};
use axum::{extract::State, Json};
use kanban_shared::service::{Response, TaskView};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ColumnRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    /// Column index
    pub column: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LimitColumnRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    pub column: i64,

    /// New limit, -1 for unlimited
    pub limit: i64,
}

/// Set a column limit
///
/// # Errors
///
/// - `400 Bad Request`: Bad index, bad limit, or limit below the current task count
pub async fn limit_column(
    State(state): State<AppState>,
    Json(req): Json<LimitColumnRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .limit_column(&req.email, &req.board_name, req.column, req.limit)
            .await,
    )
}

pub async fn get_column_limit(
    State(state): State<AppState>,
    Json(req): Json<ColumnRequest>,
) -> ApiResult<Json<Response<i64>>> {
    req.validate()?;

    let service = state.service.lock().await;
    envelope(service.get_column_limit(&req.email, &req.board_name, req.column))
}

pub async fn get_column_name(
    State(state): State<AppState>,
    Json(req): Json<ColumnRequest>,
) -> ApiResult<Json<Response<String>>> {
    req.validate()?;

    let service = state.service.lock().await;
    envelope(service.get_column_name(&req.email, &req.board_name, req.column))
}

pub async fn get_column(
    State(state): State<AppState>,
    Json(req): Json<ColumnRequest>,
) -> ApiResult<Json<Response<Vec<TaskView>>>> {
    req.validate()?;

    let service = state.service.lock().await;
    envelope(service.get_column(&req.email, &req.board_name, req.column))
}
