//! Health check endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "database": "connected",
//!   "migrations": "up_to_date",
//!   "connections": 1
//! }
//! ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use kanban_shared::db::{migrations::get_migration_status, pool};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// `up_to_date`, `pending` or `unknown`
    pub migrations: String,

    /// Open pool connections
    pub connections: usize,
}

/// Returns service health including database connectivity and schema state
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match pool::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check query failed");
            "disconnected"
        }
    };

    let migrations = match get_migration_status(&state.db).await {
        Ok(status) if status.is_up_to_date => "up_to_date",
        Ok(_) => "pending",
        Err(_) => "unknown",
    };

    let healthy = database_status == "connected" && migrations == "up_to_date";

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
        migrations: migrations.to_string(),
        connections: pool::get_pool_stats(&state.db).total_connections,
    }))
}
