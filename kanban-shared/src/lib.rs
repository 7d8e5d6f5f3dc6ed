//! # Kanban Shared Library
//!
//! Business logic, persistence and the service envelope for the Kanban board
//! manager. The HTTP server in `kanban-api` is a thin layer over
//! [`service::KanbanService`].
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and embedded migrations
//! - `models`: row types and their SQL
//! - `auth`: password hashing, email validation, sessions
//! - `kanban`: boards, columns, tasks and the facades enforcing their rules
//! - `service`: `{ErrorMessage, ReturnValue}` envelope and JSON views

pub mod auth;
pub mod db;
pub mod kanban;
pub mod models;
pub mod service;

/// Current version of the Kanban shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
