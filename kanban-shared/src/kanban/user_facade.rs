//! User registration and login

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::error::KanbanError;
use crate::auth::email::is_valid_email;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::sessions::Sessions;
use crate::models::user::UserRow;

/// Owns the in-memory user table and keeps it in step with `users`
#[derive(Debug)]
pub struct UserFacade {
    pool: SqlitePool,
    users: HashMap<String, UserRow>,
}

impl UserFacade {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            users: HashMap::new(),
        }
    }

    /// Registers a new user and logs them in
    ///
    /// # Errors
    ///
    /// - `EmptyEmail` / `InvalidEmail` for a malformed address
    /// - `WeakPassword` if the password breaks the strength rules
    /// - `UserAlreadyExists` if the email is taken
    /// - `Database` / `Password` on storage or hashing failure
    pub async fn register(
        &mut self,
        sessions: &mut Sessions,
        email: &str,
        password: &str,
    ) -> Result<&UserRow, KanbanError> {
        let email = normalize_email(email)?;
        if !is_valid_email(&email) {
            warn!(email = %email, "Registration with invalid email");
            return Err(KanbanError::InvalidEmail);
        }
        validate_password_strength(password).map_err(KanbanError::WeakPassword)?;

        if sessions.is_registered(&email) || self.users.contains_key(&email) {
            warn!(email = %email, "Registration for existing user");
            return Err(KanbanError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = UserRow::create(&self.pool, &email, &password_hash).await?;

        sessions.register(&email)?;
        sessions.login(&email)?;

        info!(email = %email, "User registered");
        Ok(self.users.entry(email).or_insert(user))
    }

    /// Logs a registered user in
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the email is unknown
    /// - `IncorrectCredentials` if the password does not match
    /// - `Session(AlreadyLoggedIn)` if the user already has a session
    pub async fn login(
        &mut self,
        sessions: &mut Sessions,
        email: &str,
        password: &str,
    ) -> Result<&UserRow, KanbanError> {
        let email = normalize_email(email)?;
        let user = self.users.get(&email).ok_or_else(|| {
            warn!(email = %email, "Login for unknown user");
            KanbanError::UserNotFound
        })?;

        if !verify_password(password, &user.password_hash)? {
            warn!(email = %email, "Login with wrong password");
            return Err(KanbanError::IncorrectCredentials);
        }

        sessions.login(&email)?;
        info!(email = %email, "User logged in");
        Ok(user)
    }

    /// Ends a user's session
    pub fn logout(&self, sessions: &mut Sessions, email: &str) -> Result<(), KanbanError> {
        let email = normalize_email(email)?;
        sessions.logout(&email)?;
        Ok(())
    }

    pub fn get_user(&self, email: &str) -> Result<&UserRow, KanbanError> {
        self.users
            .get(&email.to_lowercase())
            .ok_or(KanbanError::UserNotFound)
    }

    /// Loads every stored user into memory, registered but logged out
    pub async fn load_all(&mut self, sessions: &mut Sessions) -> Result<usize, KanbanError> {
        let rows = UserRow::list_all(&self.pool).await?;

        self.users.clear();
        for row in rows {
            sessions.add_registered_silently(&row.email);
            self.users.insert(row.email.clone(), row);
        }

        info!(users = self.users.len(), "Users loaded");
        Ok(self.users.len())
    }

    /// Deletes every user from storage and memory
    ///
    /// Board data references users, so boards must be deleted first.
    pub async fn delete_all(&mut self, sessions: &mut Sessions) -> Result<(), KanbanError> {
        let deleted = UserRow::delete_all(&self.pool).await?;

        self.users.clear();
        sessions.clear();

        warn!(deleted, "All users deleted");
        Ok(())
    }
}

/// Lowercases an email, rejecting blank input
pub(crate) fn normalize_email(email: &str) -> Result<String, KanbanError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(KanbanError::EmptyEmail);
    }
    Ok(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sessions::SessionError;
    use crate::models::test_pool;

    #[tokio::test]
    async fn test_register_logs_user_in() {
        let mut facade = UserFacade::new(test_pool().await);
        let mut sessions = Sessions::new();

        let user = facade
            .register(&mut sessions, "Alice@Example.com", "Secret1")
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert!(sessions.is_logged_in("alice@example.com"));
    }

    #[tokio::test]
    async fn test_register_rejections() {
        let mut facade = UserFacade::new(test_pool().await);
        let mut sessions = Sessions::new();

        assert!(matches!(
            facade.register(&mut sessions, "  ", "Secret1").await,
            Err(KanbanError::EmptyEmail)
        ));
        assert!(matches!(
            facade.register(&mut sessions, "not-an-email", "Secret1").await,
            Err(KanbanError::InvalidEmail)
        ));
        assert!(matches!(
            facade.register(&mut sessions, "a@example.com", "weak").await,
            Err(KanbanError::WeakPassword(_))
        ));

        facade.register(&mut sessions, "a@example.com", "Secret1").await.unwrap();
        assert!(matches!(
            facade.register(&mut sessions, "A@EXAMPLE.COM", "Secret1").await,
            Err(KanbanError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let mut facade = UserFacade::new(test_pool().await);
        let mut sessions = Sessions::new();
        facade.register(&mut sessions, "a@example.com", "Secret1").await.unwrap();

        assert!(matches!(
            facade.login(&mut sessions, "a@example.com", "Secret1").await,
            Err(KanbanError::Session(SessionError::AlreadyLoggedIn))
        ));

        facade.logout(&mut sessions, "a@example.com").unwrap();
        assert!(matches!(
            facade.logout(&mut sessions, "a@example.com"),
            Err(KanbanError::Session(SessionError::NotLoggedIn(_)))
        ));

        assert!(matches!(
            facade.login(&mut sessions, "a@example.com", "Wrong1").await,
            Err(KanbanError::IncorrectCredentials)
        ));
        assert!(matches!(
            facade.login(&mut sessions, "b@example.com", "Secret1").await,
            Err(KanbanError::UserNotFound)
        ));

        facade.login(&mut sessions, "A@example.com", "Secret1").await.unwrap();
        assert!(sessions.is_logged_in("a@example.com"));
    }

    #[tokio::test]
    async fn test_load_restores_users_logged_out() {
        let pool = test_pool().await;
        let mut sessions = Sessions::new();
        UserFacade::new(pool.clone())
            .register(&mut sessions, "a@example.com", "Secret1")
            .await
            .unwrap();

        let mut fresh = UserFacade::new(pool);
        let mut fresh_sessions = Sessions::new();
        assert_eq!(fresh.load_all(&mut fresh_sessions).await.unwrap(), 1);

        assert!(fresh_sessions.is_registered("a@example.com"));
        assert!(!fresh_sessions.is_logged_in("a@example.com"));
        assert!(fresh.get_user("a@example.com").is_ok());
    }
}
