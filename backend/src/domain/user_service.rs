//! User directory use-cases backed by the `UserRepository` port.
//!
//! `UserService` implements both driving ports so HTTP handlers stay thin.
//! Persistence failures are logged with their internal detail and replaced
//! with client-safe domain errors here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::ports::{
    DeleteOutcome, UpdateOutcome, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use super::{Error, User, UserDraft, UserId};

/// Message returned for absent users.
pub const USER_NOT_FOUND: &str = "User not found";

/// Domain service for the user directory.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(operation: &'static str, error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(operation, %message, "user store unavailable");
            Error::service_unavailable("database unavailable")
        }
        UserPersistenceError::Conflict { message } => {
            debug!(operation, %message, "user store rejected duplicate");
            Error::conflict("email is already registered")
        }
        UserPersistenceError::Query { message } => {
            error!(operation, %message, "user store query failed");
            Error::internal(message)
        }
    }
}

fn found_or_not_found(user: Option<User>) -> Result<User, Error> {
    user.ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

#[async_trait]
impl UsersQuery for UserService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| map_persistence_error("list", err))
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error("find_by_id", err))?;
        found_or_not_found(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, Error> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|err| map_persistence_error("find_by_email", err))?;
        found_or_not_found(user)
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .repository
            .insert(&draft)
            .await
            .map_err(|err| map_persistence_error("insert", err))?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<UpdateOutcome, Error> {
        let matched = self
            .repository
            .update(id, &draft)
            .await
            .map_err(|err| map_persistence_error("update", err))?;
        if matched {
            Ok(UpdateOutcome::Updated)
        } else {
            debug!(user_id = %id, "update matched no user");
            Ok(UpdateOutcome::NoMatch)
        }
    }

    async fn delete_user(&self, id: UserId) -> Result<DeleteOutcome, Error> {
        let matched = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_persistence_error("delete", err))?;
        if matched {
            Ok(DeleteOutcome::Deleted)
        } else {
            debug!(user_id = %id, "delete matched no user");
            Ok(DeleteOutcome::NoMatch)
        }
    }
}
