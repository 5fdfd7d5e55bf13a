//! Token signing and password hashing configuration.
//!
//! Secrets come from the environment through [`mockable::Env`] so parsing can
//! be exercised without touching process state. The signing secret is the
//! only setting the server refuses to start without.

use std::fmt;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::crypto::DEFAULT_BCRYPT_COST;

pub mod fingerprint;

pub(crate) const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub(crate) const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub(crate) const SECRET_MIN_LEN: usize = 32;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;
const BCRYPT_COST_EXPECTED: &str = "an integer between 4 and 31";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Weak or malformed optional settings are tolerated with a warning.
    Debug,
    /// Every setting must be present and valid.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use evstations::inbound::http::auth_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Process-wide token signing secret, wiped from memory on drop.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Raw key material for the token service constructor.
    pub fn expose(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Validated authentication settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HMAC key for identity tokens.
    pub secret: SigningSecret,
    /// Bcrypt work factor.
    pub bcrypt_cost: u32,
}

/// Errors raised while validating authentication configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AuthConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short for release builds.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Build authentication settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use evstations::inbound::http::auth_config::{auth_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let settings = auth_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.bcrypt_cost, 10);
/// ```
pub fn auth_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AuthSettings, AuthConfigError> {
    let secret = secret_from_env(env, mode)?;
    let bcrypt_cost = bcrypt_cost_from_env(env, mode)?;
    Ok(AuthSettings {
        secret,
        bcrypt_cost,
    })
}

fn secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SigningSecret, AuthConfigError> {
    let raw = env
        .string(JWT_SECRET_ENV)
        .map(Zeroizing::new)
        .filter(|value| !value.trim().is_empty())
        .ok_or(AuthConfigError::MissingEnv {
            name: JWT_SECRET_ENV,
        })?;

    let length = raw.len();
    if length < SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(AuthConfigError::SecretTooShort {
                name: JWT_SECRET_ENV,
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
        warn!(
            length,
            min_len = SECRET_MIN_LEN,
            "JWT_SECRET shorter than recommended (dev only)"
        );
    }
    Ok(SigningSecret::new(raw.as_bytes()))
}

fn bcrypt_cost_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u32, AuthConfigError> {
    let Some(value) = env.string(BCRYPT_COST_ENV) else {
        return Ok(DEFAULT_BCRYPT_COST);
    };

    match value.trim().parse::<u32>() {
        Ok(cost) if BCRYPT_COST_RANGE.contains(&cost) => Ok(cost),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid BCRYPT_COST; using default");
            Ok(DEFAULT_BCRYPT_COST)
        }
        _ => Err(AuthConfigError::InvalidEnv {
            name: BCRYPT_COST_ENV,
            value,
            expected: BCRYPT_COST_EXPECTED,
        }),
    }
}

#[cfg(test)]
mod tests;
