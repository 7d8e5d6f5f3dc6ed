//! Column rows and their queries
//!
//! Every board has exactly three column rows, keyed by `(board_id, kind)`.
//! A `column_limit` of `-1` means unlimited.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A board column as stored in the `columns` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ColumnRow {
    /// Owning board
    pub board_id: i64,

    /// Column name: "backlog", "in progress" or "done"
    pub kind: String,

    /// Maximum number of tasks, or -1 for unlimited
    pub column_limit: i64,
}

impl ColumnRow {
    /// Inserts a column for a board
    ///
    /// # Errors
    ///
    /// Returns an error if the board does not exist or already has a column
    /// of this kind.
    pub async fn create(
        pool: &SqlitePool,
        board_id: i64,
        kind: &str,
        column_limit: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query("INSERT INTO columns (board_id, kind, column_limit) VALUES (?, ?, ?)")
            .bind(board_id)
            .bind(kind)
            .bind(column_limit)
            .execute(pool)
            .await?;

        Ok(ColumnRow {
            board_id,
            kind: kind.to_string(),
            column_limit,
        })
    }

    /// Changes a column's task limit
    ///
    /// # Returns
    ///
    /// `true` if the column existed and was updated
    pub async fn update_limit(
        pool: &SqlitePool,
        board_id: i64,
        kind: &str,
        column_limit: i64,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE columns SET column_limit = ? WHERE board_id = ? AND kind = ?")
                .bind(column_limit)
                .bind(board_id)
                .bind(kind)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every column of every board
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ColumnRow>(
            "SELECT board_id, kind, column_limit FROM columns ORDER BY board_id, kind",
        )
        .fetch_all(pool)
        .await
    }
}
