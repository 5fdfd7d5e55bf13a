//! Driving port for registration and login.
//!
//! Inbound adapters call this port without knowing which credential store,
//! hasher or token backend sits behind it, so handler tests can substitute a
//! double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, RegistrationDetails};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an identity and return it with a fresh token.
    ///
    /// # Errors
    /// - `Conflict` when the email is already registered.
    /// - `InternalError` when hashing, storage or signing fails.
    async fn register(&self, details: RegistrationDetails) -> Result<AuthSession, Error>;

    /// Prove an identity and return it with a fresh token.
    ///
    /// # Errors
    /// - `Unauthorized` for an unknown email or a wrong password.
    /// - `InternalError` when the lookup or signing fails.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}
