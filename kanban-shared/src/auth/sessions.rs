//! In-memory session tracking
//!
//! `Sessions` records which users are registered and which are currently
//! logged in. All emails are lowercased before they are stored or looked up.
//! Nothing here is persisted; registered users are restored from the
//! database on load, and every user starts logged out.

use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Errors raised by session bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("User already registered")]
    AlreadyRegistered,

    #[error("User already logged in")]
    AlreadyLoggedIn,

    #[error("User {0} is not logged in")]
    NotLoggedIn(String),
}

/// Registered and logged-in user sets
#[derive(Debug, Default)]
pub struct Sessions {
    registered: HashSet<String>,
    logged_in: HashSet<String>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new user as registered
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyRegistered` if the email is known
    pub fn register(&mut self, email: &str) -> Result<(), SessionError> {
        let email = email.to_lowercase();
        if self.registered.contains(&email) {
            warn!(email = %email, "User is already registered");
            return Err(SessionError::AlreadyRegistered);
        }

        self.registered.insert(email);
        Ok(())
    }

    /// Marks a user as logged in
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyLoggedIn` if the user has a session
    pub fn login(&mut self, email: &str) -> Result<(), SessionError> {
        let email = email.to_lowercase();
        if self.logged_in.contains(&email) {
            warn!(email = %email, "User already logged in");
            return Err(SessionError::AlreadyLoggedIn);
        }

        self.logged_in.insert(email);
        Ok(())
    }

    /// Ends a user's session
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoggedIn` if the user has no session
    pub fn logout(&mut self, email: &str) -> Result<(), SessionError> {
        let email = email.to_lowercase();
        if self.logged_in.remove(&email) {
            info!(email = %email, "User logged out");
            Ok(())
        } else {
            warn!(email = %email, "Logout for user without a session");
            Err(SessionError::NotLoggedIn(email))
        }
    }

    pub fn is_logged_in(&self, email: &str) -> bool {
        self.logged_in.contains(&email.to_lowercase())
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.registered.contains(&email.to_lowercase())
    }

    /// Registers a user loaded from the database without logging them in
    pub fn add_registered_silently(&mut self, email: &str) {
        let email = email.to_lowercase();
        debug!(email = %email, "Restored registered user");
        self.registered.insert(email);
    }

    /// Forgets every registered user and session
    pub fn clear(&mut self) {
        self.registered.clear();
        self.logged_in.clear();
    }
}
