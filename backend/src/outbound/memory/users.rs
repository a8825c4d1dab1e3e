//! In-memory credential store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

use super::{read, write};

#[derive(Default)]
struct UserTable {
    accounts: Vec<UserAccount>,
    by_email: HashMap<EmailAddress, usize>,
}

/// Process-local [`UserRepository`] with a unique email index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut table = write(&self.table, poisoned)?;
        let email = account.user().email();
        if table.by_email.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        let index = table.accounts.len();
        table.by_email.insert(email.clone(), index);
        table.accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let table = read(&self.table, poisoned)?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|index| table.accounts.get(*index))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = read(&self.table, poisoned)?;
        Ok(table
            .accounts
            .iter()
            .find(|account| account.user().id() == id)
            .map(|account| account.user().clone()))
    }
}
