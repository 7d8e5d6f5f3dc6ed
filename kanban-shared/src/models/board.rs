//! Board rows and their queries
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE boards (
//!     board_id INTEGER PRIMARY KEY NOT NULL,
//!     board_name TEXT NOT NULL,
//!     owner TEXT NOT NULL REFERENCES users(email)
//! );
//! ```
//!
//! Board ids are assigned by the business layer, not by SQLite, so they
//! stay stable across reloads. Columns, tasks and collaborators reference
//! the board with `ON DELETE CASCADE`.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A board as stored in the `boards` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardRow {
    /// Board id, unique for the lifetime of the database
    pub board_id: i64,

    /// Lowercase board name
    pub board_name: String,

    /// Owner's email
    pub owner: String,
}

impl BoardRow {
    /// Inserts a new board
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken, the owner is not a registered
    /// user, or the database is unreachable.
    pub async fn create(
        pool: &SqlitePool,
        board_id: i64,
        board_name: &str,
        owner: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query("INSERT INTO boards (board_id, board_name, owner) VALUES (?, ?, ?)")
            .bind(board_id)
            .bind(board_name)
            .bind(owner)
            .execute(pool)
            .await?;

        Ok(BoardRow {
            board_id,
            board_name: board_name.to_string(),
            owner: owner.to_string(),
        })
    }

    /// Transfers ownership of a board
    ///
    /// # Returns
    ///
    /// `true` if the board existed and was updated
    pub async fn update_owner(
        pool: &SqlitePool,
        board_id: i64,
        new_owner: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE boards SET owner = ? WHERE board_id = ?")
            .bind(new_owner)
            .bind(board_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a board together with its columns, tasks and collaborators
    ///
    /// # Returns
    ///
    /// `true` if the board existed
    pub async fn delete(pool: &SqlitePool, board_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE board_id = ?")
            .bind(board_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every board, ordered by id
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BoardRow>(
            "SELECT board_id, board_name, owner FROM boards ORDER BY board_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Deletes every board and, through the cascade, every column, task and
    /// collaborator row
    ///
    /// # Returns
    ///
    /// Number of boards deleted
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column::ColumnRow;
    use crate::models::test_pool;
    use crate::models::user::UserRow;

    #[tokio::test]
    async fn test_create_update_and_list_boards() {
        let pool = test_pool().await;
        UserRow::create(&pool, "alice@example.com", "hash").await.unwrap();
        UserRow::create(&pool, "bob@example.com", "hash").await.unwrap();

        BoardRow::create(&pool, 1, "sprint", "alice@example.com").await.unwrap();
        BoardRow::create(&pool, 0, "backlog", "alice@example.com").await.unwrap();

        assert!(BoardRow::update_owner(&pool, 1, "bob@example.com").await.unwrap());
        assert!(!BoardRow::update_owner(&pool, 42, "bob@example.com").await.unwrap());

        let boards = BoardRow::list_all(&pool).await.unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].board_id, 0);
        assert_eq!(boards[1].owner, "bob@example.com");
    }

    #[tokio::test]
    async fn test_owner_must_be_registered() {
        let pool = test_pool().await;

        let result = BoardRow::create(&pool, 0, "orphan", "nobody@example.com").await;
        assert!(result.is_err(), "foreign key on owner should be enforced");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_columns() {
        let pool = test_pool().await;
        UserRow::create(&pool, "alice@example.com", "hash").await.unwrap();
        BoardRow::create(&pool, 0, "sprint", "alice@example.com").await.unwrap();
        ColumnRow::create(&pool, 0, "backlog", -1).await.unwrap();

        assert!(BoardRow::delete(&pool, 0).await.unwrap());
        assert!(!BoardRow::delete(&pool, 0).await.unwrap());
        assert!(ColumnRow::list_all(&pool).await.unwrap().is_empty());
    }
}
