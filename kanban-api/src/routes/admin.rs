//! Data management endpoints
//!
//! - `POST /v1/admin/load` - Reload every user and board from storage
//! - `POST /v1/admin/reset` - Delete every user and board
//!
//! Reset also ends every session.

use crate::{
    app::AppState,
    error::{envelope, ApiResult},
};
use axum::{extract::State, Json};
use kanban_shared::service::Response;
use tracing::info;

pub async fn load_data(State(state): State<AppState>) -> ApiResult<Json<Response<()>>> {
    let mut service = state.service.lock().await;
    let response = service.load_data().await;

    if response.is_ok() {
        info!("Data reloaded from storage");
    }
    envelope(response)
}

pub async fn delete_data(State(state): State<AppState>) -> ApiResult<Json<Response<()>>> {
    let mut service = state.service.lock().await;
    let response = service.delete_data().await;

    if response.is_ok() {
        info!("All data deleted");
    }
    envelope(response)
}
