//! Business-layer error type
//!
//! Every rejected operation returns a `KanbanError`. The `Display` text is
//! the message callers see in the response envelope; [`KanbanError::kind`]
//! groups the variants so front ends can pick a status code.

use crate::auth::password::PasswordError;
use crate::auth::sessions::SessionError;

/// Broad category of a [`KanbanError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,
    /// No session, or bad credentials
    Unauthenticated,
    /// Authenticated but not allowed (not owner, not assignee)
    Forbidden,
    /// Referenced user, board, column or task does not exist
    NotFound,
    /// Request clashes with current state (duplicates, full columns)
    Conflict,
    /// Storage or hashing failure
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    // Input validation
    #[error("Email must not be empty.")]
    EmptyEmail,

    #[error("Invalid email provided.")]
    InvalidEmail,

    #[error("Password doesn't match expected criteria: {0}")]
    WeakPassword(String),

    #[error("Invalid board name.")]
    InvalidBoardName,

    #[error("Board name is too long, maximum length is 50 characters.")]
    BoardNameTooLong,

    #[error("Invalid title, must be between 1-50 characters and not white spaces.")]
    InvalidTitle,

    #[error("Description must be at most 300 characters.")]
    InvalidDescription,

    #[error("Due date cannot be before the task's creation time.")]
    DueDateBeforeCreation,

    #[error("Due date cannot be in the past.")]
    DueDateInPast,

    #[error("Invalid column index.")]
    InvalidColumnIndex,

    #[error("Invalid limit, new limit should be -1 or a positive integer.")]
    InvalidLimit,

    #[error("Invalid limit, new limit should be higher than current tasks count.")]
    LimitBelowTaskCount,

    // Authentication
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("User is not logged in.")]
    NotLoggedIn,

    #[error("Email or password is incorrect.")]
    IncorrectCredentials,

    // Permissions
    #[error("{email} is not the owner of board {board_id}.")]
    NotBoardOwner { email: String, board_id: i64 },

    #[error("Board owner cannot leave the board.")]
    OwnerCannotLeave,

    #[error("{email} is not a member of the board.")]
    NotCollaborator { email: String },

    #[error("Task {task_id} can only be modified by its assignee.")]
    NotAssignee { task_id: i64 },

    #[error("Task is already assigned to someone else. Only the current assignee can reassign.")]
    AssignedToSomeoneElse,

    // Missing entities
    #[error("User not found.")]
    UserNotFound,

    #[error("Board does not exist.")]
    BoardNotFound,

    #[error("Task does not exist in this column.")]
    TaskNotFound { task_id: i64 },

    // State conflicts
    #[error("User already exists.")]
    UserAlreadyExists,

    #[error("Board with this name already exists.")]
    DuplicateBoardName,

    #[error("User already joined this board.")]
    AlreadyJoined,

    #[error("Column has reached its task limit")]
    ColumnFull,

    #[error("Cannot move task: column {column} is full")]
    NextColumnFull { column: &'static str },

    #[error("Cannot move task: already in done column")]
    AlreadyDone,

    #[error("Cannot modify a task that is already done.")]
    TaskDone,

    // Infrastructure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl KanbanError {
    /// Category used by front ends to map errors to status codes
    pub fn kind(&self) -> ErrorKind {
        use KanbanError::*;

        match self {
            EmptyEmail
            | InvalidEmail
            | WeakPassword(_)
            | InvalidBoardName
            | BoardNameTooLong
            | InvalidTitle
            | InvalidDescription
            | DueDateBeforeCreation
            | DueDateInPast
            | InvalidColumnIndex
            | InvalidLimit
            | LimitBelowTaskCount => ErrorKind::Validation,

            Session(SessionError::AlreadyRegistered) => ErrorKind::Conflict,
            Session(SessionError::AlreadyLoggedIn) => ErrorKind::Conflict,
            Session(SessionError::NotLoggedIn(_)) | NotLoggedIn | IncorrectCredentials => {
                ErrorKind::Unauthenticated
            }

            NotBoardOwner { .. }
            | OwnerCannotLeave
            | NotCollaborator { .. }
            | NotAssignee { .. }
            | AssignedToSomeoneElse => ErrorKind::Forbidden,

            UserNotFound | BoardNotFound | TaskNotFound { .. } => ErrorKind::NotFound,

            UserAlreadyExists | DuplicateBoardName | AlreadyJoined | ColumnFull
            | NextColumnFull { .. } | AlreadyDone | TaskDone => ErrorKind::Conflict,

            Database(_) | Password(_) => ErrorKind::Internal,
        }
    }
}
