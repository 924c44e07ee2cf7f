//! Port abstraction for user persistence adapters and their errors.
//!
//! Each method corresponds to a single parameterised SQL statement in the
//! production adapter. Absence is reported explicitly: lookups return
//! `Option`, mutations return whether a row matched.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Driven port for the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new row and return it with its store-assigned identifier.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite the row matching `id`.
    ///
    /// Returns `false` without creating anything when no row matches.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError>;

    /// Remove the row matching `id`, returning whether one existed.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user, ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
