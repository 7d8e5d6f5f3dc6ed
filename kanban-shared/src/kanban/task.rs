//! Task entity and field rules

use chrono::{DateTime, Utc};

use super::column::ColumnKind;
use super::error::KanbanError;
use crate::models::task::TaskRow;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 300;

/// A task on a board
///
/// The column a task sits in is tracked by the owning [`Column`], not here.
///
/// [`Column`]: super::column::Column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    id: i64,
    title: String,
    description: String,
    due_date: DateTime<Utc>,
    creation_time: DateTime<Utc>,
    assignee: Option<String>,
}

impl TaskItem {
    /// Builds a new, unassigned task created at `now`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad title, description or due date.
    pub fn new(
        id: i64,
        title: &str,
        description: &str,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, KanbanError> {
        validate_title(title)?;
        validate_description(description)?;
        validate_due_date(due_date, now, now)?;

        Ok(Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            creation_time: now,
            assignee: None,
        })
    }

    /// Rebuilds a task from its stored row without re-validating it
    pub fn from_row(row: &TaskRow) -> Self {
        Self {
            id: row.task_id,
            title: row.title.clone(),
            description: row.description.clone(),
            due_date: row.due_date,
            creation_time: row.creation_time,
            assignee: row.assignee.clone(),
        }
    }

    /// Row for this task sitting in `column` of board `board_id`
    pub fn to_row(&self, board_id: i64, column: ColumnKind) -> TaskRow {
        TaskRow {
            task_id: self.id,
            board_id,
            kind: column.name().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            creation_time: self.creation_time,
            assignee: self.assignee.clone(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn is_assigned_to(&self, email: &str) -> bool {
        self.assignee.as_deref() == Some(email)
    }

    /// Copy of this task with a new title
    pub fn with_title(&self, title: &str) -> Result<Self, KanbanError> {
        validate_title(title)?;
        Ok(Self {
            title: title.to_string(),
            ..self.clone()
        })
    }

    /// Copy of this task with a new description
    pub fn with_description(&self, description: &str) -> Result<Self, KanbanError> {
        validate_description(description)?;
        Ok(Self {
            description: description.to_string(),
            ..self.clone()
        })
    }

    /// Copy of this task with a new due date, checked against `now`
    pub fn with_due_date(
        &self,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, KanbanError> {
        validate_due_date(due_date, self.creation_time, now)?;
        Ok(Self {
            due_date,
            ..self.clone()
        })
    }

    /// Copy of this task with a different assignee
    pub fn with_assignee(&self, assignee: Option<String>) -> Self {
        Self {
            assignee,
            ..self.clone()
        }
    }
}

/// Title must be 1 to 50 characters and not only whitespace
pub fn validate_title(title: &str) -> Result<(), KanbanError> {
    if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(KanbanError::InvalidTitle);
    }
    Ok(())
}

/// Description may be empty but not longer than 300 characters
pub fn validate_description(description: &str) -> Result<(), KanbanError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(KanbanError::InvalidDescription);
    }
    Ok(())
}

/// Due date may not precede the task's creation time or the present
pub fn validate_due_date(
    due_date: DateTime<Utc>,
    creation_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), KanbanError> {
    if due_date < creation_time {
        return Err(KanbanError::DueDateBeforeCreation);
    }
    if due_date < now {
        return Err(KanbanError::DueDateInPast);
    }
    Ok(())
}
