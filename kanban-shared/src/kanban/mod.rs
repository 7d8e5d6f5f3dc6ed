//! Board, column, task and user rules
//!
//! Entities (`Board`, `Column`, `TaskItem`) hold state and field validation.
//! The facades enforce the cross-entity rules (sessions, ownership,
//! membership, assignment) and write every change through to SQLite before
//! applying it in memory.

pub mod board;
pub mod board_facade;
pub mod column;
pub mod error;
pub mod task;
pub mod user_facade;

pub use board::Board;
pub use board_facade::BoardFacade;
pub use column::{Column, ColumnKind};
pub use error::{ErrorKind, KanbanError};
pub use task::TaskItem;
pub use user_facade::UserFacade;
