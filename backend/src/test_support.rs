//! Test utilities for the users API crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and the `test-support` feature only.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};
use crate::inbound::http::state::HttpState;

#[derive(Debug)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|(id, user)| Some(*id) != except && user.email() == email)
    }
}

/// `UserRepository` held in process memory.
///
/// Identifiers start at 1 and increase monotonically, like a `BIGSERIAL`
/// column, and email addresses are unique across rows.
///
/// # Examples
/// ```
/// use users_api::domain::UserDraft;
/// use users_api::domain::ports::UserRepository;
/// use users_api::test_support::InMemoryUserRepository;
///
/// # actix_rt::System::new().block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let draft = UserDraft::try_from_strings("alice", "a@x.com").expect("valid draft");
/// let user = repo.insert(&draft).await.expect("insert succeeds");
/// assert_eq!(user.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory store poisoned"))
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.store.lock().map(|store| store.rows.len()).unwrap_or(0)
    }

    /// Whether no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if store.email_taken(draft.email().as_ref(), None) {
            return Err(UserPersistenceError::conflict("users_email_key"));
        }
        let id = UserId::new(store.next_id);
        store.next_id += 1;
        let user = User::new(id, draft.clone());
        store.rows.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError> {
        let mut store = self.lock()?;
        if !store.rows.contains_key(&id.get()) {
            return Ok(false);
        }
        if store.email_taken(draft.email().as_ref(), Some(id.get())) {
            return Err(UserPersistenceError::conflict("users_email_key"));
        }
        store.rows.insert(id.get(), User::new(id, draft.clone()));
        Ok(true)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.remove(&id.get()).is_some())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }
}

/// Build HTTP state over a fresh in-memory repository, returning both so
/// tests can inspect the store directly.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::default());
    let state = HttpState::from_repository(repository.clone());
    (state, repository)
}
