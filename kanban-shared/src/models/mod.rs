//! Database models for the Kanban board manager
//!
//! One module per table. Each row type carries its own async CRUD functions
//! taking a `&SqlitePool` and returning `sqlx::Error` on failure; no
//! business rules live here.
//!
//! # Models
//!
//! - `user`: registered users and their password hashes
//! - `board`: boards and their owners
//! - `column`: the three fixed columns per board and their limits
//! - `task`: tasks, keyed per board
//! - `collaborator`: board membership
//!
//! # Example
//!
//! ```no_run
//! use kanban_shared::db::migrations::run_migrations;
//! use kanban_shared::db::pool::{create_pool, DatabaseConfig};
//! use kanban_shared::models::{board::BoardRow, user::UserRow};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//! run_migrations(&pool).await?;
//!
//! UserRow::create(&pool, "user@example.com", "$argon2id$...").await?;
//! BoardRow::create(&pool, 0, "sprint", "user@example.com").await?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod collaborator;
pub mod column;
pub mod task;
pub mod user;

/// In-memory pool with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use crate::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};

    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool should open");
    run_migrations(&pool).await.expect("migrations should apply");
    pool
}
