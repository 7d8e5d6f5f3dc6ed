//! Board entity
//!
//! A board owns its three columns, its collaborator set and the counter for
//! its task ids. It holds no database handle: the facade writes a change
//! first and then applies it here.

use std::collections::BTreeSet;

use super::column::{Column, ColumnKind};
use super::error::KanbanError;
use super::task::TaskItem;

/// Maximum board name length in characters
pub const MAX_BOARD_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct Board {
    id: i64,
    name: String,
    owner: String,
    columns: [Column; 3],
    collaborators: BTreeSet<String>,
    next_task_id: i64,
}

impl Board {
    /// New empty board with unlimited columns. The owner is its first
    /// collaborator.
    pub fn new(id: i64, name: &str, owner: &str) -> Self {
        let mut collaborators = BTreeSet::new();
        collaborators.insert(owner.to_string());

        Self {
            id,
            name: name.to_string(),
            owner: owner.to_string(),
            columns: ColumnKind::ALL.map(Column::new),
            collaborators,
            next_task_id: 0,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_owner(&self, email: &str) -> bool {
        self.owner == email
    }

    pub fn collaborators(&self) -> impl Iterator<Item = &str> {
        self.collaborators.iter().map(String::as_str)
    }

    pub fn is_collaborator(&self, email: &str) -> bool {
        self.collaborators.contains(email)
    }

    /// Id the next created task will receive
    pub fn next_task_id(&self) -> i64 {
        self.next_task_id
    }

    pub fn column(&self, kind: ColumnKind) -> &Column {
        &self.columns[kind.index()]
    }

    pub fn column_mut(&mut self, kind: ColumnKind) -> &mut Column {
        &mut self.columns[kind.index()]
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Column holding `task_id`, if the task exists
    pub fn locate_task(&self, task_id: i64) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|column| column.get(task_id).is_some())
            .map(Column::kind)
    }

    pub fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    pub fn add_collaborator(&mut self, email: &str) {
        self.collaborators.insert(email.to_string());
    }

    /// Removes a collaborator and clears them from every task they were
    /// assigned to
    pub fn remove_collaborator(&mut self, email: &str) {
        self.collaborators.remove(email);
        for column in self.columns.iter_mut() {
            for task in column.tasks_mut() {
                if task.is_assigned_to(email) {
                    *task = task.with_assignee(None);
                }
            }
        }
    }

    /// Appends a freshly created task to the backlog and bumps the id
    /// counter
    pub fn push_new_task(&mut self, task: TaskItem) {
        self.next_task_id = self.next_task_id.max(task.id() + 1);
        self.column_mut(ColumnKind::Backlog).insert(task);
    }

    /// Places a task loaded from storage, keeping the id counter ahead of it
    pub(crate) fn restore_task(&mut self, kind: ColumnKind, task: TaskItem) {
        self.next_task_id = self.next_task_id.max(task.id() + 1);
        self.column_mut(kind).insert(task);
    }

    /// Moves a task to the next column, replacing it with `updated`
    pub fn move_task(&mut self, from: ColumnKind, to: ColumnKind, updated: TaskItem) {
        self.column_mut(from).remove(updated.id());
        self.column_mut(to).insert(updated);
    }
}

/// Normalizes a board name and checks it
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 50 characters.
pub fn normalize_board_name(name: &str) -> Result<String, KanbanError> {
    if name.trim().is_empty() {
        return Err(KanbanError::InvalidBoardName);
    }
    if name.chars().count() > MAX_BOARD_NAME_LENGTH {
        return Err(KanbanError::BoardNameTooLong);
    }
    Ok(name.to_lowercase())
}
