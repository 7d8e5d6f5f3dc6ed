//! User rows and their queries
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     email TEXT PRIMARY KEY NOT NULL,
//!     password_hash TEXT NOT NULL,
//!     created_at TEXT NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kanban_shared::models::user::UserRow;
//! use kanban_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let user = UserRow::create(&pool, "user@example.com", "$argon2id$...").await?;
//! let found = UserRow::find_by_email(&pool, &user.email).await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A registered user as stored in the `users` table
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    /// Email address, lowercase. Primary key.
    pub email: String,

    /// Argon2id password hash (PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Inserts a new user
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `email` - Lowercase email address
    /// * `password_hash` - Argon2id hash, NOT the plaintext password
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (primary key violation)
    /// or the database is unreachable.
    pub async fn create(
        pool: &SqlitePool,
        email: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let user = UserRow {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?)")
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by email
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Lists every user, ordered by email
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT email, password_hash, created_at FROM users ORDER BY email",
        )
        .fetch_all(pool)
        .await
    }

    /// Deletes every user
    ///
    /// Boards reference their owner, so the board tables must be cleared
    /// first.
    ///
    /// # Returns
    ///
    /// Number of users deleted
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_pool;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = test_pool().await;

        let user = UserRow::create(&pool, "alice@example.com", "hash").await.unwrap();
        assert_eq!(user.email, "alice@example.com");

        let found = UserRow::find_by_email(&pool, "alice@example.com")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(found.password_hash, "hash");
        assert_eq!(found.created_at, user.created_at);

        assert!(UserRow::find_by_email(&pool, "bob@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = test_pool().await;

        UserRow::create(&pool, "alice@example.com", "hash").await.unwrap();
        let result = UserRow::create(&pool, "alice@example.com", "other").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_and_delete_all() {
        let pool = test_pool().await;

        UserRow::create(&pool, "b@example.com", "hash").await.unwrap();
        UserRow::create(&pool, "a@example.com", "hash").await.unwrap();

        let users = UserRow::list_all(&pool).await.unwrap();
        let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);

        assert_eq!(UserRow::delete_all(&pool).await.unwrap(), 2);
        assert!(UserRow::list_all(&pool).await.unwrap().is_empty());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = UserRow {
            email: "alice@example.com".to_string(),
            password_hash: "secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
    }
}
