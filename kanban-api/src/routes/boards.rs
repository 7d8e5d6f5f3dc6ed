//! Board endpoints
//!
//! - `POST /v1/boards` - Create a board owned by the caller
//! - `POST /v1/boards/delete` - Delete an owned board
//! - `GET  /v1/boards?email=` - Ids of the boards the caller belongs to
//! - `GET  /v1/boards/:board_id/name` - Name of a board
//! - `POST /v1/boards/:board_id/join` - Join a board
//! - `POST /v1/boards/:board_id/leave` - Leave a board
//! - `POST /v1/boards/owner` - Hand ownership to another member
//! - `POST /v1/boards/view` - Full snapshot of a board

use crate::{
    app::AppState,
    error::{envelope, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use kanban_shared::service::{BoardView, Response};
use serde::Deserialize;
use validator::Validate;

/// Identifies a board by its name among the caller's boards
#[derive(Debug, Deserialize, Validate)]
pub struct BoardRequest {
    /// Acting user
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,
}

/// Acting user only
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Query string for `GET /v1/boards`
#[derive(Debug, Deserialize, Validate)]
pub struct EmailQuery {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeOwnerRequest {
    /// Current owner
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub board_name: String,

    /// Member taking over
    #[validate(length(min = 1, message = "New owner is required"))]
    pub new_owner: String,
}

/// Create a board
///
/// ```text
/// POST /v1/boards
///
/// {"email": "user@example.com", "board_name": "sprint"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank or too long name
/// - `401 Unauthorized`: Not logged in
/// - `409 Conflict`: The user already has a board with this name
pub async fn create_board(
    State(state): State<AppState>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<Response<BoardView>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.create_board(&req.email, &req.board_name).await)
}

/// Delete a board with its columns, tasks and memberships
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not the owner
/// - `404 Not Found`: No such board
pub async fn delete_board(
    State(state): State<AppState>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.delete_board(&req.email, &req.board_name).await)
}

pub async fn list_user_boards(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Response<Vec<i64>>>> {
    query.validate()?;

    let service = state.service.lock().await;
    envelope(service.get_user_boards(&query.email))
}

/// Name of a board; no login required
pub async fn get_board_name(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> ApiResult<Json<Response<String>>> {
    let service = state.service.lock().await;
    envelope(service.get_board_name(board_id))
}

/// Join a board as collaborator
///
/// # Errors
///
/// - `404 Not Found`: No such board
/// - `409 Conflict`: Already a member, or the caller has a board with the same name
pub async fn join_board(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    Json(req): Json<EmailRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.join_board(&req.email, board_id).await)
}

/// Leave a board; the caller's tasks there become unassigned
///
/// # Errors
///
/// - `403 Forbidden`: The caller owns the board or is not a member
pub async fn leave_board(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    Json(req): Json<EmailRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.leave_board(&req.email, board_id).await)
}

pub async fn change_owner(
    State(state): State<AppState>,
    Json(req): Json<ChangeOwnerRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(
        service
            .change_owner(&req.email, &req.board_name, &req.new_owner)
            .await,
    )
}

pub async fn get_board(
    State(state): State<AppState>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<Response<BoardView>>> {
    req.validate()?;

    let service = state.service.lock().await;
    envelope(service.get_board(&req.email, &req.board_name))
}
