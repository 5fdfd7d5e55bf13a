//! In-memory credential store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, UserAccount};

/// Accounts keyed by exact email. Insertion checks and writes under one lock,
/// so concurrent registrations of the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.lock()?.get(email.as_ref()).cloned())
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        let key = account.user().email().as_ref();
        if accounts.contains_key(key) {
            return Err(UserPersistenceError::duplicate_email());
        }
        accounts.insert(key.to_owned(), account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{PasswordHash, User, UserId};
    use rstest::rstest;

    fn account(email: &str) -> UserAccount {
        UserAccount::new(
            User::new(UserId::random(), EmailAddress::new(email).expect("email"), None),
            PasswordHash::new("$2b$10$hash").expect("hash"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&account("a@x.com")).await.expect("insert");

        let upper = EmailAddress::new("A@x.com").expect("email");
        assert!(repo.find_by_email(&upper).await.expect("lookup").is_none());
        let lower = EmailAddress::new("a@x.com").expect("email");
        assert!(repo.find_by_email(&lower).await.expect("lookup").is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_duplicate_inserts_store_one_row() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(&account("a@x.com")).await })
            })
            .collect();

        let mut successes = 0;
        for task in tasks {
            match task.await.expect("task joins") {
                Ok(()) => successes += 1,
                Err(err) => assert_eq!(err, UserPersistenceError::DuplicateEmail),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.len().expect("len"), 1);
    }
}
