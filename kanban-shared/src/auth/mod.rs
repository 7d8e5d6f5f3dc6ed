//! Authentication utilities
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and strength rules
//! - [`email`]: account email validation
//! - [`sessions`]: registered and logged-in user tracking
//!
//! # Example
//!
//! ```
//! use kanban_shared::auth::{email::is_valid_email, password::validate_password_strength};
//! use kanban_shared::auth::sessions::Sessions;
//!
//! assert!(is_valid_email("user@example.com"));
//! assert!(validate_password_strength("Secret1").is_ok());
//!
//! let mut sessions = Sessions::new();
//! sessions.register("user@example.com").unwrap();
//! sessions.login("user@example.com").unwrap();
//! assert!(sessions.is_logged_in("USER@example.com"));
//! ```

pub mod email;
pub mod password;
pub mod sessions;
