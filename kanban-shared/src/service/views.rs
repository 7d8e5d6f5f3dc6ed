//! Serializable snapshots returned to callers
//!
//! Field names are PascalCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kanban::{Board, Column, TaskItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskView {
    pub id: i64,
    pub creation_time: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub assignee: Option<String>,
}

impl From<&TaskItem> for TaskView {
    fn from(task: &TaskItem) -> Self {
        Self {
            id: task.id(),
            creation_time: task.creation_time(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            due_date: task.due_date(),
            assignee: task.assignee().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnView {
    pub column_name: String,
    pub limit: i64,
    pub tasks: Vec<TaskView>,
}

impl From<&Column> for ColumnView {
    fn from(column: &Column) -> Self {
        Self {
            column_name: column.kind().name().to_string(),
            limit: column.limit(),
            tasks: column.tasks().map(TaskView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoardView {
    pub id: i64,
    pub board_name: String,
    pub owner: String,
    /// Backlog, in progress, done
    pub columns: Vec<ColumnView>,
    pub collaborators: Vec<String>,
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id(),
            board_name: board.name().to_string(),
            owner: board.owner().to_string(),
            columns: board.columns().map(ColumnView::from).collect(),
            collaborators: board.collaborators().map(str::to_string).collect(),
        }
    }
}
