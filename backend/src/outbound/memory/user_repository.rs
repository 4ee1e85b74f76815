//! `UserRepository` backed by an in-memory username index.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct UserTable {
    by_username: HashMap<String, User>,
    last_id: i64,
}

/// In-memory account store enforcing unique usernames.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut guard = self
            .table
            .lock()
            .map_err(|_| UserPersistenceError::query("user table lock poisoned"))?;
        let table = &mut *guard;
        let next_id = table.last_id + 1;
        match table.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(UserPersistenceError::duplicate_username(
                user.username.as_str(),
            )),
            Entry::Vacant(slot) => {
                let stored = User::new(
                    UserId::new(next_id),
                    user.username.as_str(),
                    user.password_hash.clone(),
                    user.role,
                );
                slot.insert(stored.clone());
                table.last_id = next_id;
                Ok(stored)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let table = self
            .table
            .lock()
            .map_err(|_| UserPersistenceError::query("user table lock poisoned"))?;
        Ok(table.by_username.get(username).cloned())
    }
}
