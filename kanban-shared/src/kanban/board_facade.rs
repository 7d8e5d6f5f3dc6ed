//! Board, column and task operations
//!
//! `BoardFacade` owns every board in memory and writes each change through to
//! SQLite. Each operation validates first, then writes, then updates memory,
//! so a failed write leaves the in-memory state untouched.
//!
//! Every operation that takes an acting `email` requires that user to be
//! logged in. Emails and board names are compared lowercase, and a board is
//! addressed by name only among the boards the caller collaborates on.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::board::{normalize_board_name, Board};
use super::column::{Column, ColumnKind, UNLIMITED};
use super::error::KanbanError;
use super::task::TaskItem;
use super::user_facade::normalize_email;
use crate::auth::sessions::Sessions;
use crate::models::{
    board::BoardRow, collaborator::CollaboratorRow, column::ColumnRow, task::TaskRow,
};

#[derive(Debug)]
pub struct BoardFacade {
    pool: SqlitePool,
    boards: BTreeMap<i64, Board>,
    next_board_id: i64,
}

impl BoardFacade {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            boards: BTreeMap::new(),
            next_board_id: 0,
        }
    }

    /// Id the next created board will receive
    pub fn next_board_id(&self) -> i64 {
        self.next_board_id
    }

    /// Creates a board owned by `email` with three unlimited columns
    ///
    /// # Errors
    ///
    /// - `InvalidBoardName` / `BoardNameTooLong` for a bad name
    /// - `DuplicateBoardName` if the user already sees a board with this name
    pub async fn create_board(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
    ) -> Result<&Board, KanbanError> {
        let email = require_login(sessions, email)?;
        let name = normalize_board_name(board_name)?;

        if self.find_user_board(&email, &name).is_some() {
            warn!(email = %email, board_name = %name, "Duplicate board name");
            return Err(KanbanError::DuplicateBoardName);
        }

        // Ids are never handed out twice, even if the writes below fail.
        let board_id = self.next_board_id;
        self.next_board_id += 1;

        BoardRow::create(&self.pool, board_id, &name, &email).await?;
        for kind in ColumnKind::ALL {
            ColumnRow::create(&self.pool, board_id, kind.name(), UNLIMITED).await?;
        }
        CollaboratorRow::create(&self.pool, board_id, &email).await?;

        info!(email = %email, board_id, board_name = %name, "Board created");
        Ok(self
            .boards
            .entry(board_id)
            .or_insert_with(|| Board::new(board_id, &name, &email)))
    }

    /// Deletes a board with all of its tasks. Owner only.
    pub async fn delete_board(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        if !board.is_owner(&email) {
            warn!(email = %email, board_id, "Delete by non-owner");
            return Err(KanbanError::NotBoardOwner { email, board_id });
        }

        BoardRow::delete(&self.pool, board_id).await?;
        self.boards.remove(&board_id);

        info!(email = %email, board_id, "Board deleted");
        Ok(())
    }

    /// Board named `board_name` among the caller's boards
    pub fn get_board(
        &self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
    ) -> Result<&Board, KanbanError> {
        let email = require_login(sessions, email)?;
        self.user_board(&email, board_name)
    }

    /// Name of any board by id. Needs no session.
    pub fn get_board_name(&self, board_id: i64) -> Result<&str, KanbanError> {
        self.boards
            .get(&board_id)
            .map(Board::name)
            .ok_or(KanbanError::BoardNotFound)
    }

    /// Ids of every board the user collaborates on, ascending
    pub fn get_user_boards(&self, sessions: &Sessions, email: &str) -> Result<Vec<i64>, KanbanError> {
        let email = require_login(sessions, email)?;
        Ok(self.boards_of(&email).map(Board::id).collect())
    }

    /// Adds the caller as a collaborator of board `board_id`
    ///
    /// # Errors
    ///
    /// - `BoardNotFound` if there is no such board
    /// - `AlreadyJoined` if the caller already collaborates on it
    /// - `DuplicateBoardName` if the caller already sees a board with the
    ///   same name
    pub async fn join_board(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_id: i64,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.boards.get(&board_id).ok_or(KanbanError::BoardNotFound)?;

        if board.is_collaborator(&email) {
            return Err(KanbanError::AlreadyJoined);
        }
        if self.find_user_board(&email, board.name()).is_some() {
            warn!(email = %email, board_id, "Join would duplicate a board name");
            return Err(KanbanError::DuplicateBoardName);
        }

        CollaboratorRow::create(&self.pool, board_id, &email).await?;
        self.board_mut(board_id)?.add_collaborator(&email);

        info!(email = %email, board_id, "User joined board");
        Ok(())
    }

    /// Removes the caller from board `board_id` and unassigns their tasks
    ///
    /// # Errors
    ///
    /// - `BoardNotFound` if there is no such board
    /// - `OwnerCannotLeave` for the owner
    /// - `NotCollaborator` if the caller is not on the board
    pub async fn leave_board(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_id: i64,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.boards.get(&board_id).ok_or(KanbanError::BoardNotFound)?;

        if board.is_owner(&email) {
            return Err(KanbanError::OwnerCannotLeave);
        }
        if !board.is_collaborator(&email) {
            return Err(KanbanError::NotCollaborator { email });
        }

        // Membership first: a failed unassign then leaves only stale
        // assignees on a board the user no longer belongs to.
        CollaboratorRow::delete(&self.pool, board_id, &email).await?;
        let unassigned = TaskRow::unassign_all(&self.pool, board_id, &email).await?;
        self.board_mut(board_id)?.remove_collaborator(&email);

        info!(email = %email, board_id, unassigned, "User left board");
        Ok(())
    }

    /// Hands a board over to another collaborator. Current owner only.
    pub async fn change_owner(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        new_owner: &str,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let new_owner = normalize_email(new_owner)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        if !board.is_owner(&email) {
            return Err(KanbanError::NotBoardOwner { email, board_id });
        }
        if !board.is_collaborator(&new_owner) {
            return Err(KanbanError::NotCollaborator { email: new_owner });
        }

        BoardRow::update_owner(&self.pool, board_id, &new_owner).await?;
        self.board_mut(board_id)?.set_owner(&new_owner);

        info!(board_id, old_owner = %email, new_owner = %new_owner, "Board owner changed");
        Ok(())
    }

    /// Sets a column's task limit (-1 for unlimited)
    pub async fn limit_column(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
        limit: i64,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let kind = ColumnKind::from_index(column)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        board.column(kind).check_limit(limit)?;

        ColumnRow::update_limit(&self.pool, board_id, kind.name(), limit).await?;
        self.board_mut(board_id)?.column_mut(kind).set_limit(limit);

        info!(board_id, column = %kind, limit, "Column limit changed");
        Ok(())
    }

    pub fn get_column_limit(
        &self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
    ) -> Result<i64, KanbanError> {
        Ok(self.get_column(sessions, email, board_name, column)?.limit())
    }

    pub fn get_column_name(
        &self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
    ) -> Result<&'static str, KanbanError> {
        Ok(self.get_column(sessions, email, board_name, column)?.kind().name())
    }

    pub fn get_column(
        &self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
    ) -> Result<&Column, KanbanError> {
        let email = require_login(sessions, email)?;
        let kind = ColumnKind::from_index(column)?;
        Ok(self.user_board(&email, board_name)?.column(kind))
    }

    /// Every "in progress" task on the caller's boards
    pub fn in_progress_tasks(
        &self,
        sessions: &Sessions,
        email: &str,
    ) -> Result<Vec<&TaskItem>, KanbanError> {
        let email = require_login(sessions, email)?;
        Ok(self
            .boards_of(&email)
            .flat_map(|board| board.column(ColumnKind::InProgress).tasks())
            .collect())
    }

    /// Creates an unassigned task in the backlog
    ///
    /// # Errors
    ///
    /// - `ColumnFull` if the backlog is at its limit
    /// - a validation error for a bad title, description or due date
    pub async fn create_task(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        title: &str,
        description: &str,
        due_date: DateTime<Utc>,
    ) -> Result<TaskItem, KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        board.column(ColumnKind::Backlog).ensure_capacity()?;
        let task = TaskItem::new(board.next_task_id(), title, description, due_date, Utc::now())?;

        TaskRow::create(&self.pool, &task.to_row(board_id, ColumnKind::Backlog)).await?;
        self.board_mut(board_id)?.push_new_task(task.clone());

        info!(email = %email, board_id, task_id = task.id(), "Task created");
        Ok(task)
    }

    /// Deletes a task from the given column
    pub async fn delete_task(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let kind = ColumnKind::from_index(column)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        board.column(kind).task(task_id)?;

        TaskRow::delete(&self.pool, board_id, task_id).await?;
        self.board_mut(board_id)?.column_mut(kind).remove(task_id);

        info!(email = %email, board_id, task_id, "Task deleted");
        Ok(())
    }

    /// Renames a task. Assignee only, unless the task is done.
    pub async fn edit_task_title(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        task_id: i64,
        title: &str,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        let (kind, task) = find_task(board, task_id)?;
        ensure_may_edit_text(task, kind, &email)?;
        let updated = task.with_title(title)?;

        self.save_task(board_id, kind, updated).await?;
        debug!(board_id, task_id, "Task title edited");
        Ok(())
    }

    /// Rewrites a task's description. Assignee only, unless the task is done.
    pub async fn edit_task_description(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        task_id: i64,
        description: &str,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        let (kind, task) = find_task(board, task_id)?;
        ensure_may_edit_text(task, kind, &email)?;
        let updated = task.with_description(description)?;

        self.save_task(board_id, kind, updated).await?;
        debug!(board_id, task_id, "Task description edited");
        Ok(())
    }

    /// Moves a task's due date. Assignee only, and never once done.
    pub async fn edit_task_due_date(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        task_id: i64,
        due_date: DateTime<Utc>,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        let (kind, task) = find_task(board, task_id)?;
        if kind == ColumnKind::Done {
            return Err(KanbanError::TaskDone);
        }
        if !task.is_assigned_to(&email) {
            warn!(email = %email, board_id, task_id, "Due date edit by non-assignee");
            return Err(KanbanError::NotAssignee { task_id });
        }
        let updated = task.with_due_date(due_date, Utc::now())?;

        self.save_task(board_id, kind, updated).await?;
        debug!(board_id, task_id, "Task due date edited");
        Ok(())
    }

    /// Moves a task one column to the right
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task is not in `column`
    /// - `NotAssignee` if the task is assigned to someone else
    /// - `AlreadyDone` for a task in "done"
    /// - `NextColumnFull` if the target column is at its limit
    pub async fn advance_task(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let kind = ColumnKind::from_index(column)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        let task = board.column(kind).task(task_id)?;
        if task.assignee().is_some() && !task.is_assigned_to(&email) {
            warn!(email = %email, board_id, task_id, "Advance by non-assignee");
            return Err(KanbanError::NotAssignee { task_id });
        }
        let next = kind.next().ok_or(KanbanError::AlreadyDone)?;
        if board.column(next).is_full() {
            return Err(KanbanError::NextColumnFull { column: next.name() });
        }
        let moved = task.clone();

        TaskRow::update(&self.pool, &moved.to_row(board_id, next)).await?;
        self.board_mut(board_id)?.move_task(kind, next, moved);

        info!(email = %email, board_id, task_id, from = %kind, to = %next, "Task advanced");
        Ok(())
    }

    /// Assigns a task to a collaborator
    ///
    /// An unassigned task may be assigned by any collaborator; an assigned
    /// one only by its current assignee.
    pub async fn assign_task(
        &mut self,
        sessions: &Sessions,
        email: &str,
        board_name: &str,
        column: i64,
        task_id: i64,
        assignee: &str,
    ) -> Result<(), KanbanError> {
        let email = require_login(sessions, email)?;
        let assignee = normalize_email(assignee)?;
        let kind = ColumnKind::from_index(column)?;
        let board = self.user_board(&email, board_name)?;
        let board_id = board.id();

        if !board.is_collaborator(&assignee) {
            return Err(KanbanError::NotCollaborator { email: assignee });
        }
        let task = board.column(kind).task(task_id)?;
        if task.assignee().is_some() && !task.is_assigned_to(&email) {
            warn!(email = %email, board_id, task_id, "Reassign by non-assignee");
            return Err(KanbanError::AssignedToSomeoneElse);
        }
        let updated = task.with_assignee(Some(assignee.clone()));

        self.save_task(board_id, kind, updated).await?;
        info!(board_id, task_id, assignee = %assignee, "Task assigned");
        Ok(())
    }

    /// Rebuilds every board from storage
    ///
    /// The board id counter resumes after the highest stored id.
    pub async fn load_all(&mut self) -> Result<usize, KanbanError> {
        let board_rows = BoardRow::list_all(&self.pool).await?;
        let column_rows = ColumnRow::list_all(&self.pool).await?;
        let task_rows = TaskRow::list_all(&self.pool).await?;
        let collaborator_rows = CollaboratorRow::list_all(&self.pool).await?;

        let mut boards: BTreeMap<i64, Board> = board_rows
            .iter()
            .map(|row| (row.board_id, Board::new(row.board_id, &row.board_name, &row.owner)))
            .collect();

        for row in &column_rows {
            match (boards.get_mut(&row.board_id), ColumnKind::from_name(&row.kind)) {
                (Some(board), Some(kind)) => board.column_mut(kind).set_limit(row.column_limit),
                _ => warn!(board_id = row.board_id, kind = %row.kind, "Skipping unknown column row"),
            }
        }

        for row in &task_rows {
            match (boards.get_mut(&row.board_id), ColumnKind::from_name(&row.kind)) {
                (Some(board), Some(kind)) => board.restore_task(kind, TaskItem::from_row(row)),
                _ => warn!(board_id = row.board_id, task_id = row.task_id, "Skipping orphaned task row"),
            }
        }

        for row in &collaborator_rows {
            if let Some(board) = boards.get_mut(&row.board_id) {
                board.add_collaborator(&row.email);
            }
        }

        if let Some(max_id) = boards.keys().next_back() {
            self.next_board_id = self.next_board_id.max(max_id + 1);
        }
        self.boards = boards;

        info!(
            boards = self.boards.len(),
            tasks = task_rows.len(),
            next_board_id = self.next_board_id,
            "Boards loaded"
        );
        Ok(self.boards.len())
    }

    /// Deletes every board, column, task and collaborator
    ///
    /// The id counter keeps running so ids are not reused.
    pub async fn delete_all(&mut self) -> Result<(), KanbanError> {
        let deleted = BoardRow::delete_all(&self.pool).await?;
        self.boards.clear();

        warn!(deleted, "All boards deleted");
        Ok(())
    }

    async fn save_task(
        &mut self,
        board_id: i64,
        kind: ColumnKind,
        task: TaskItem,
    ) -> Result<(), KanbanError> {
        TaskRow::update(&self.pool, &task.to_row(board_id, kind)).await?;
        self.board_mut(board_id)?.column_mut(kind).insert(task);
        Ok(())
    }

    fn boards_of<'a, 'e>(&'a self, email: &'e str) -> impl Iterator<Item = &'a Board> + 'e
    where
        'a: 'e,
    {
        self.boards
            .values()
            .filter(move |board| board.is_collaborator(email))
    }

    fn find_user_board(&self, email: &str, name: &str) -> Option<&Board> {
        self.boards_of(email).find(|board| board.name() == name)
    }

    fn user_board(&self, email: &str, board_name: &str) -> Result<&Board, KanbanError> {
        self.find_user_board(email, &board_name.to_lowercase())
            .ok_or(KanbanError::BoardNotFound)
    }

    fn board_mut(&mut self, board_id: i64) -> Result<&mut Board, KanbanError> {
        self.boards
            .get_mut(&board_id)
            .ok_or(KanbanError::BoardNotFound)
    }
}

/// Lowercased caller email, if that user is registered and logged in
fn require_login(sessions: &Sessions, email: &str) -> Result<String, KanbanError> {
    let email = normalize_email(email)?;
    if !sessions.is_registered(&email) {
        return Err(KanbanError::UserNotFound);
    }
    if !sessions.is_logged_in(&email) {
        return Err(KanbanError::NotLoggedIn);
    }
    Ok(email)
}

/// Titles and descriptions may be edited by the assignee, or by anyone on a
/// done task
/// Column and task for `task_id`, wherever it currently sits on the board
fn find_task(board: &Board, task_id: i64) -> Result<(ColumnKind, &TaskItem), KanbanError> {
    let kind = board
        .locate_task(task_id)
        .ok_or(KanbanError::TaskNotFound { task_id })?;
    Ok((kind, board.column(kind).task(task_id)?))
}

fn ensure_may_edit_text(task: &TaskItem, kind: ColumnKind, email: &str) -> Result<(), KanbanError> {
    if kind == ColumnKind::Done || task.is_assigned_to(email) {
        Ok(())
    } else {
        Err(KanbanError::NotAssignee { task_id: task.id() })
    }
}
