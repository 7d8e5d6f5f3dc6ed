//! Database layer
//!
//! # Modules
//!
//! - `pool`: SQLite connection pool management with health checks
//! - `migrations`: Embedded migration runner
//! - Row types and their queries are in the `models` module at crate root level

pub mod migrations;
pub mod pool;
