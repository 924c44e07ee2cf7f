//! Driving port for user-facing reads.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every stored user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with `id`, or a `NotFound` error.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;

    /// Return the user registered under `email`, or a `NotFound` error.
    async fn find_user_by_email(&self, email: &str) -> Result<User, Error>;
}
