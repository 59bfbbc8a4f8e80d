//! Registration and login against the `users` table.
//!
//! Passwords are stored as an unsalted SHA-256 hex digest so that existing
//! record stores keep working. That scheme has no salt and no work factor;
//! do not build anything new on top of it.

use crate::db::models::DbUser;
use crate::db::sqlite::RecordStore;
use crate::error::TrackerError;
use crate::session::Session;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

pub struct CredentialStore<'a> {
    store: &'a RecordStore,
}

impl<'a> CredentialStore<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Add a user. Usernames are unique and case-sensitive.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), TrackerError> {
        if username.is_empty() || password.is_empty() {
            return Err(TrackerError::InvalidInput(
                "username and password are required",
            ));
        }

        sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(hash_password(password))
            .execute(self.store.pool())
            .await
            .map_err(TrackerError::from)
            .map_err(|e| {
                if e.is_unique_violation() {
                    TrackerError::DuplicateUser(username.to_string())
                } else {
                    e
                }
            })?;

        info!(username, "registered user");
        Ok(())
    }

    /// Check a username/password pair and open a session for it.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, TrackerError> {
        if username.is_empty() || password.is_empty() {
            return Err(TrackerError::InvalidCredentials);
        }

        let user = sqlx::query_as::<_, DbUser>(
            "SELECT username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.store.pool())
        .await?;

        let Some(user) = user else {
            debug!(username, "login for unknown user");
            return Err(TrackerError::InvalidCredentials);
        };

        let candidate = hash_password(password);
        if !bool::from(candidate.as_bytes().ct_eq(user.password_hash.as_bytes())) {
            debug!(username, "login with wrong password");
            return Err(TrackerError::InvalidCredentials);
        }

        info!(username, "user logged in");
        Ok(Session::new(user.username))
    }
}

/// Lowercase hex SHA-256 of the raw password bytes.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
