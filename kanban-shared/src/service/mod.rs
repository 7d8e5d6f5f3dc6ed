//! Service boundary
//!
//! [`KanbanService`] owns the sessions and both facades and exposes every
//! operation as a [`Response`] envelope:
//!
//! ```json
//! {"ErrorMessage": null, "ReturnValue": ...}
//! ```
//!
//! Exactly one of the two fields is set for a value-returning call; for
//! calls without a value both are `null` on success.
//!
//! # Example
//!
//! ```no_run
//! use kanban_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
//! use kanban_shared::service::KanbanService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//! run_migrations(&pool).await?;
//!
//! let mut service = KanbanService::new(pool);
//! service.load_data().await;
//!
//! let response = service.register("user@example.com", "Secret1").await;
//! println!("{}", response.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod views;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::auth::sessions::Sessions;
use crate::kanban::{BoardFacade, ErrorKind, KanbanError, UserFacade};
pub use views::{BoardView, ColumnView, TaskView};

/// Result envelope returned by every service call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,

    #[serde(rename = "ReturnValue")]
    pub return_value: Option<T>,

    /// Category of the failure, for front ends. Not serialized.
    #[serde(skip)]
    pub error_kind: Option<ErrorKind>,
}

impl<T> Response<T> {
    pub fn ok(value: T) -> Self {
        Self {
            error_message: None,
            return_value: Some(value),
            error_kind: None,
        }
    }

    pub fn error(error: &KanbanError) -> Self {
        Self {
            error_message: Some(error.to_string()),
            return_value: None,
            error_kind: Some(error.kind()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_message.is_none()
    }
}

impl<T: Serialize> Response<T> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<T> From<Result<T, KanbanError>> for Response<T> {
    fn from(result: Result<T, KanbanError>) -> Self {
        match result {
            Ok(value) => Response::ok(value),
            Err(error) => {
                debug!(error = %error, "Operation rejected");
                Response::error(&error)
            }
        }
    }
}

/// Single entry point over users, boards, columns and tasks
#[derive(Debug)]
pub struct KanbanService {
    sessions: Sessions,
    users: UserFacade,
    boards: BoardFacade,
}

impl KanbanService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sessions: Sessions::new(),
            users: UserFacade::new(pool.clone()),
            boards: BoardFacade::new(pool),
        }
    }

    // Users

    pub async fn register(&mut self, email: &str, password: &str) -> Response<()> {
        self.users
            .register(&mut self.sessions, email, password)
            .await
            .map(|_| ())
            .into()
    }

    /// Returns the normalized email on success
    pub async fn login(&mut self, email: &str, password: &str) -> Response<String> {
        self.users
            .login(&mut self.sessions, email, password)
            .await
            .map(|user| user.email.clone())
            .into()
    }

    pub fn logout(&mut self, email: &str) -> Response<()> {
        self.users.logout(&mut self.sessions, email).into()
    }

    // Boards

    pub async fn create_board(&mut self, email: &str, board_name: &str) -> Response<BoardView> {
        self.boards
            .create_board(&self.sessions, email, board_name)
            .await
            .map(BoardView::from)
            .into()
    }

    pub async fn delete_board(&mut self, email: &str, board_name: &str) -> Response<()> {
        self.boards
            .delete_board(&self.sessions, email, board_name)
            .await
            .into()
    }

    pub fn get_board(&self, email: &str, board_name: &str) -> Response<BoardView> {
        self.boards
            .get_board(&self.sessions, email, board_name)
            .map(BoardView::from)
            .into()
    }

    pub fn get_board_name(&self, board_id: i64) -> Response<String> {
        self.boards
            .get_board_name(board_id)
            .map(str::to_string)
            .into()
    }

    pub fn get_user_boards(&self, email: &str) -> Response<Vec<i64>> {
        self.boards.get_user_boards(&self.sessions, email).into()
    }

    pub async fn join_board(&mut self, email: &str, board_id: i64) -> Response<()> {
        self.boards
            .join_board(&self.sessions, email, board_id)
            .await
            .into()
    }

    pub async fn leave_board(&mut self, email: &str, board_id: i64) -> Response<()> {
        self.boards
            .leave_board(&self.sessions, email, board_id)
            .await
            .into()
    }

    pub async fn change_owner(
        &mut self,
        email: &str,
        board_name: &str,
        new_owner: &str,
    ) -> Response<()> {
        self.boards
            .change_owner(&self.sessions, email, board_name, new_owner)
            .await
            .into()
    }

    // Columns

    pub async fn limit_column(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        limit: i64,
    ) -> Response<()> {
        self.boards
            .limit_column(&self.sessions, email, board_name, column, limit)
            .await
            .into()
    }

    pub fn get_column_limit(&self, email: &str, board_name: &str, column: i64) -> Response<i64> {
        self.boards
            .get_column_limit(&self.sessions, email, board_name, column)
            .into()
    }

    pub fn get_column_name(&self, email: &str, board_name: &str, column: i64) -> Response<String> {
        self.boards
            .get_column_name(&self.sessions, email, board_name, column)
            .map(str::to_string)
            .into()
    }

    pub fn get_column(&self, email: &str, board_name: &str, column: i64) -> Response<Vec<TaskView>> {
        self.boards
            .get_column(&self.sessions, email, board_name, column)
            .map(|col| col.tasks().map(TaskView::from).collect())
            .into()
    }

    // Tasks

    pub fn in_progress_tasks(&self, email: &str) -> Response<Vec<TaskView>> {
        self.boards
            .in_progress_tasks(&self.sessions, email)
            .map(|tasks| tasks.into_iter().map(TaskView::from).collect())
            .into()
    }

    pub async fn create_task(
        &mut self,
        email: &str,
        board_name: &str,
        title: &str,
        description: &str,
        due_date: DateTime<Utc>,
    ) -> Response<TaskView> {
        self.boards
            .create_task(&self.sessions, email, board_name, title, description, due_date)
            .await
            .map(|task| TaskView::from(&task))
            .into()
    }

    pub async fn delete_task(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
    ) -> Response<()> {
        self.boards
            .delete_task(&self.sessions, email, board_name, column, task_id)
            .await
            .into()
    }

    pub async fn edit_task_title(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: i64,
        title: &str,
    ) -> Response<()> {
        self.boards
            .edit_task_title(&self.sessions, email, board_name, task_id, title)
            .await
            .into()
    }

    pub async fn edit_task_description(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: i64,
        description: &str,
    ) -> Response<()> {
        self.boards
            .edit_task_description(&self.sessions, email, board_name, task_id, description)
            .await
            .into()
    }

    pub async fn edit_task_due_date(
        &mut self,
        email: &str,
        board_name: &str,
        task_id: i64,
        due_date: DateTime<Utc>,
    ) -> Response<()> {
        self.boards
            .edit_task_due_date(&self.sessions, email, board_name, task_id, due_date)
            .await
            .into()
    }

    pub async fn advance_task(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
    ) -> Response<()> {
        self.boards
            .advance_task(&self.sessions, email, board_name, column, task_id)
            .await
            .into()
    }

    pub async fn assign_task(
        &mut self,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
        assignee: &str,
    ) -> Response<()> {
        self.boards
            .assign_task(&self.sessions, email, board_name, column, task_id, assignee)
            .await
            .into()
    }

    // Data

    /// Loads every user and board from storage. Everyone starts logged out.
    pub async fn load_data(&mut self) -> Response<()> {
        self.load_all().await.into()
    }

    /// Deletes every board and user from storage and memory
    pub async fn delete_data(&mut self) -> Response<()> {
        self.delete_all().await.into()
    }

    async fn load_all(&mut self) -> Result<(), KanbanError> {
        self.users.load_all(&mut self.sessions).await?;
        self.boards.load_all().await?;
        Ok(())
    }

    // Boards go first: they reference their owners.
    async fn delete_all(&mut self) -> Result<(), KanbanError> {
        self.boards.delete_all().await?;
        self.users.delete_all(&mut self.sessions).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = Response::ok(3i64).to_json().unwrap();
        assert_eq!(json, r#"{"ErrorMessage":null,"ReturnValue":3}"#);

        let unit = Response::ok(()).to_json().unwrap();
        assert_eq!(unit, r#"{"ErrorMessage":null,"ReturnValue":null}"#);
    }

    #[test]
    fn test_error_envelope() {
        let response: Response<i64> = Err(KanbanError::BoardNotFound).into();

        assert!(!response.is_ok());
        assert_eq!(response.error_kind, Some(ErrorKind::NotFound));
        assert_eq!(
            response.to_json().unwrap(),
            r#"{"ErrorMessage":"Board does not exist.","ReturnValue":null}"#
        );
    }
}
