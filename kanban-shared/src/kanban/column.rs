//! Columns and their task limits

use std::collections::BTreeMap;
use std::fmt;

use super::error::KanbanError;
use super::task::TaskItem;

/// Limit value meaning "no limit"
pub const UNLIMITED: i64 = -1;

/// The three fixed columns, in board order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKind {
    Backlog,
    InProgress,
    Done,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 3] = [ColumnKind::Backlog, ColumnKind::InProgress, ColumnKind::Done];

    /// Column for an ordinal (0 = backlog, 1 = in progress, 2 = done)
    pub fn from_index(index: i64) -> Result<Self, KanbanError> {
        match index {
            0 => Ok(ColumnKind::Backlog),
            1 => Ok(ColumnKind::InProgress),
            2 => Ok(ColumnKind::Done),
            _ => Err(KanbanError::InvalidColumnIndex),
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColumnKind::Backlog => 0,
            ColumnKind::InProgress => 1,
            ColumnKind::Done => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Backlog => "backlog",
            ColumnKind::InProgress => "in progress",
            ColumnKind::Done => "done",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ColumnKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The column a task advances into, if any
    pub fn next(self) -> Option<Self> {
        match self {
            ColumnKind::Backlog => Some(ColumnKind::InProgress),
            ColumnKind::InProgress => Some(ColumnKind::Done),
            ColumnKind::Done => None,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column of a board: its limit and the tasks in it, keyed by id
#[derive(Debug, Clone)]
pub struct Column {
    kind: ColumnKind,
    limit: i64,
    tasks: BTreeMap<i64, TaskItem>,
}

impl Column {
    pub fn new(kind: ColumnKind) -> Self {
        Self::with_limit(kind, UNLIMITED)
    }

    pub fn with_limit(kind: ColumnKind, limit: i64) -> Self {
        Self {
            kind,
            limit,
            tasks: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.limit != UNLIMITED && self.tasks.len() as i64 >= self.limit
    }

    /// Tasks in id order
    pub fn tasks(&self) -> impl Iterator<Item = &TaskItem> {
        self.tasks.values()
    }

    pub fn get(&self, task_id: i64) -> Option<&TaskItem> {
        self.tasks.get(&task_id)
    }

    /// Like [`Column::get`] but reports a missing task as an error
    pub fn task(&self, task_id: i64) -> Result<&TaskItem, KanbanError> {
        self.get(task_id)
            .ok_or(KanbanError::TaskNotFound { task_id })
    }

    /// Checks that `limit` may replace the current limit
    ///
    /// The limit must be -1 or positive, and not below the number of tasks
    /// already in the column.
    pub fn check_limit(&self, limit: i64) -> Result<(), KanbanError> {
        if limit < UNLIMITED || limit == 0 {
            return Err(KanbanError::InvalidLimit);
        }
        if limit != UNLIMITED && limit < self.tasks.len() as i64 {
            return Err(KanbanError::LimitBelowTaskCount);
        }
        Ok(())
    }

    /// Sets a limit already accepted by [`Column::check_limit`]
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = limit;
    }

    /// Errors if one more task would exceed the limit
    pub fn ensure_capacity(&self) -> Result<(), KanbanError> {
        if self.is_full() {
            return Err(KanbanError::ColumnFull);
        }
        Ok(())
    }

    /// Inserts or replaces a task
    pub fn insert(&mut self, task: TaskItem) {
        self.tasks.insert(task.id(), task);
    }

    pub fn remove(&mut self, task_id: i64) -> Option<TaskItem> {
        self.tasks.remove(&task_id)
    }

    pub(crate) fn tasks_mut(&mut self) -> impl Iterator<Item = &mut TaskItem> {
        self.tasks.values_mut()
    }
}
