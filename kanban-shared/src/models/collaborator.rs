//! Board membership rows
//!
//! A `(board_id, email)` pair means the user may see and work on the board.
//! The owner always has a row.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A board collaborator as stored in the `collaborators` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollaboratorRow {
    pub board_id: i64,
    pub email: String,
}

impl CollaboratorRow {
    /// Adds a user to a board
    ///
    /// # Errors
    ///
    /// Returns an error if the user is already a collaborator or the board
    /// does not exist.
    pub async fn create(pool: &SqlitePool, board_id: i64, email: &str) -> Result<Self, sqlx::Error> {
        sqlx::query("INSERT INTO collaborators (board_id, email) VALUES (?, ?)")
            .bind(board_id)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(CollaboratorRow {
            board_id,
            email: email.to_string(),
        })
    }

    /// Removes a user from a board
    ///
    /// # Returns
    ///
    /// `true` if the user was a collaborator
    pub async fn delete(pool: &SqlitePool, board_id: i64, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collaborators WHERE board_id = ? AND email = ?")
            .bind(board_id)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every membership, grouped by board
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CollaboratorRow>(
            "SELECT board_id, email FROM collaborators ORDER BY board_id, email",
        )
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::BoardRow;
    use crate::models::test_pool;
    use crate::models::user::UserRow;

    #[tokio::test]
    async fn test_join_and_leave() {
        let pool = test_pool().await;
        UserRow::create(&pool, "alice@example.com", "hash").await.unwrap();
        BoardRow::create(&pool, 0, "sprint", "alice@example.com").await.unwrap();

        CollaboratorRow::create(&pool, 0, "alice@example.com").await.unwrap();
        CollaboratorRow::create(&pool, 0, "bob@example.com").await.unwrap();
        assert!(CollaboratorRow::create(&pool, 0, "bob@example.com").await.is_err());

        assert!(CollaboratorRow::delete(&pool, 0, "bob@example.com").await.unwrap());
        assert!(!CollaboratorRow::delete(&pool, 0, "bob@example.com").await.unwrap());

        let rows = CollaboratorRow::list_all(&pool).await.unwrap();
        assert_eq!(
            rows,
            vec![CollaboratorRow {
                board_id: 0,
                email: "alice@example.com".to_string()
            }]
        );
    }
}
