//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Result of overwriting a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A row matched and was overwritten.
    Updated,
    /// No row matched; nothing was written.
    NoMatch,
}

/// Result of deleting a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row matched and was removed.
    Deleted,
    /// No row matched; nothing was removed.
    NoMatch,
}

/// Domain use-case port for creating, overwriting, and removing users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with its assigned identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Overwrite the user with `id`.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<UpdateOutcome, Error>;

    /// Remove the user with `id`.
    async fn delete_user(&self, id: UserId) -> Result<DeleteOutcome, Error>;
}
