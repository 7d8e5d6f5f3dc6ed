//! User endpoints
//!
//! - `POST /v1/users/register` - Register and log in
//! - `POST /v1/users/login` - Log in
//! - `POST /v1/users/logout` - Log out

use crate::{
    app::AppState,
    error::{envelope, ApiResult},
};
use axum::{extract::State, Json};
use kanban_shared::service::Response;
use serde::Deserialize;
use validator::Validate;

/// Register or login request
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

/// Logout request
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Register a new user
///
/// ```text
/// POST /v1/users/register
///
/// {"email": "user@example.com", "password": "Secret1"}
/// ```
///
/// The new user is logged in on success.
///
/// # Errors
///
/// - `400 Bad Request`: Invalid email or weak password
/// - `409 Conflict`: User already exists
/// - `422 Unprocessable Entity`: Missing email
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.register(&req.email, &req.password).await)
}

/// Log in an existing user
///
/// Returns the normalized email as `ReturnValue`.
///
/// # Errors
///
/// - `401 Unauthorized`: Wrong email or password
/// - `404 Not Found`: Unknown user
/// - `409 Conflict`: Already logged in
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<Response<String>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.login(&req.email, &req.password).await)
}

/// Log out a user
///
/// # Errors
///
/// - `401 Unauthorized`: Not logged in
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> ApiResult<Json<Response<()>>> {
    req.validate()?;

    let mut service = state.service.lock().await;
    envelope(service.logout(&req.email))
}
