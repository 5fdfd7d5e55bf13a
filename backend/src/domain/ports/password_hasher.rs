//! Driven port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a hash.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or failed internally.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// Hashing the same password twice yields different encodings; both verify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against `hash`.
    ///
    /// A malformed hash verifies as `false` rather than erroring.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
