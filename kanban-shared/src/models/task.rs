//! Task rows and their queries
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     task_id INTEGER NOT NULL,
//!     board_id INTEGER NOT NULL REFERENCES boards(board_id) ON DELETE CASCADE,
//!     kind TEXT NOT NULL,
//!     title TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     due_date TEXT NOT NULL,
//!     creation_time TEXT NOT NULL,
//!     assignee TEXT,
//!     PRIMARY KEY (board_id, task_id)
//! );
//! ```
//!
//! Task ids are unique per board only. `kind` is the name of the column the
//! task currently sits in.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use kanban_shared::models::task::TaskRow;
//! # use sqlx::SqlitePool;
//!
//! # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
//! let now = Utc::now();
//! let mut task = TaskRow {
//!     task_id: 0,
//!     board_id: 0,
//!     kind: "backlog".to_string(),
//!     title: "Write docs".to_string(),
//!     description: String::new(),
//!     due_date: now + Duration::days(7),
//!     creation_time: now,
//!     assignee: None,
//! };
//! TaskRow::create(&pool, &task).await?;
//!
//! task.kind = "in progress".to_string();
//! TaskRow::update(&pool, &task).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A task as stored in the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskRow {
    /// Task id, unique within its board
    pub task_id: i64,

    /// Owning board
    pub board_id: i64,

    /// Name of the column holding the task
    pub kind: String,

    pub title: String,

    /// May be empty
    pub description: String,

    pub due_date: DateTime<Utc>,

    /// Set once on creation
    pub creation_time: DateTime<Utc>,

    /// Email of the assigned collaborator, if any
    pub assignee: Option<String>,
}

impl TaskRow {
    /// Inserts a task
    ///
    /// # Errors
    ///
    /// Returns an error if the board does not exist or already has a task
    /// with this id.
    pub async fn create(pool: &SqlitePool, task: &TaskRow) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO tasks (task_id, board_id, kind, title, description,
                               due_date, creation_time, assignee)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.task_id)
        .bind(task.board_id)
        .bind(&task.kind)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.creation_time)
        .bind(&task.assignee)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Writes every mutable field of a task
    ///
    /// `creation_time` is never updated.
    ///
    /// # Returns
    ///
    /// `true` if the task existed and was updated
    pub async fn update(pool: &SqlitePool, task: &TaskRow) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET kind = ?, title = ?, description = ?, due_date = ?, assignee = ?
            WHERE board_id = ? AND task_id = ?
            "#,
        )
        .bind(&task.kind)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(&task.assignee)
        .bind(task.board_id)
        .bind(task.task_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// `true` if the task existed
    pub async fn delete(pool: &SqlitePool, board_id: i64, task_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE board_id = ? AND task_id = ?")
            .bind(board_id)
            .bind(task_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clears the assignee of every task on a board assigned to `email`
    ///
    /// # Returns
    ///
    /// Number of tasks unassigned
    pub async fn unassign_all(
        pool: &SqlitePool,
        board_id: i64,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tasks SET assignee = NULL WHERE board_id = ? AND assignee = ?")
                .bind(board_id)
                .bind(email)
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Lists every task of every board
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, board_id, kind, title, description,
                   due_date, creation_time, assignee
            FROM tasks
            ORDER BY board_id, task_id
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
