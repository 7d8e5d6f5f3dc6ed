//! API route handlers
//!
//! Handlers are thin: they validate the request shape, lock the service and
//! turn its envelope into an HTTP response.
//!
//! - `health`: Health check endpoint
//! - `users`: Register, login, logout
//! - `boards`: Board lifecycle and membership
//! - `columns`: Column limits and contents
//! - `tasks`: Task lifecycle
//! - `admin`: Load and reset stored data

pub mod admin;
pub mod boards;
pub mod columns;
pub mod health;
pub mod tasks;
pub mod users;
