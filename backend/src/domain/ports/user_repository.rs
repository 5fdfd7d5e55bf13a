//! Driven port for the credential store.
use async_trait::async_trait;

use crate::domain::{EmailAddress, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store already holds an account for this email.
        DuplicateEmail => "user with this email already exists",
    }
}

/// Lookup and insertion of user accounts keyed by exact email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the account registered under `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Persist a new account.
    ///
    /// Must fail with [`UserPersistenceError::DuplicateEmail`] when another
    /// account already uses the same email, even under concurrent inserts.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;
}
