//! Port abstraction for user persistence adapters and their errors.
//!
//! Every operation is a single statement against the store: no transactions,
//! no retries. Store failures are returned to the caller untouched; absence of
//! a record is reported through [`Lookup::NotFound`].

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{Lookup, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Store errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established or was lost.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Statement failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Persistence protocol for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it with the store-assigned identity.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Fetch a record by identity.
    async fn find_by_id(&self, id: UserId) -> Result<Lookup<User>, UserPersistenceError>;

    /// Overwrite the mutable fields of the record identified by `user.id`.
    ///
    /// Returns [`Lookup::NotFound`] when no row was affected. Any non-zero
    /// affected-row count counts as success, even if no column changed.
    async fn update(&self, user: &User) -> Result<Lookup<User>, UserPersistenceError>;
}

#[derive(Debug)]
struct InMemoryState {
    last_id: i64,
    users: BTreeMap<UserId, User>,
}

/// Map-backed repository assigning sequential identities from 1.
///
/// Used as a substitutable double where a real store is unavailable.
///
/// # Examples
/// ```
/// use user_service::domain::ports::{InMemoryUserRepository, UserRepository};
/// use user_service::domain::{Lookup, UserDraft, UserId};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let user = repo
///     .create(&UserDraft::new("John", "Doe", "john@example.com"))
///     .await
///     .expect("create");
/// assert_eq!(user.id, UserId::new(1));
/// assert!(matches!(repo.find_by_id(user.id).await, Ok(Lookup::Found(_))));
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                last_id: 0,
                users: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    /// Whether no record has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        state.last_id += 1;
        let user = User::new(UserId::new(state.last_id), draft.clone());
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Lookup<User>, UserPersistenceError> {
        Ok(self.lock().users.get(&id).cloned().into())
    }

    async fn update(&self, user: &User) -> Result<Lookup<User>, UserPersistenceError> {
        let mut state = self.lock();
        match state.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(Lookup::Found(user.clone()))
            }
            None => Ok(Lookup::NotFound),
        }
    }
}
