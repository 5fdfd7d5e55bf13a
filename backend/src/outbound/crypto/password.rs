//! Bcrypt-backed [`PasswordHasher`].
//!
//! Bcrypt is CPU-bound, so both operations run on Tokio's blocking pool.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used unless configuration overrides it.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Salted bcrypt hashing with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl BcryptPasswordHasher {
    /// Build a hasher with `cost` rounds (log2). Bcrypt accepts 4..=31.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHashError::hashing(format!("hashing task failed: {err}")))?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &encoded))
            .await
        {
            Ok(Ok(matches)) => matches,
            Ok(Err(err)) => {
                warn!(error = %err, "stored password hash could not be parsed");
                false
            }
            Err(err) => {
                warn!(error = %err, "password verification task failed");
                false
            }
        }
    }
}
