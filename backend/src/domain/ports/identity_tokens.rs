//! Driven ports for issuing and verifying signed identity tokens.

use crate::domain::{AccessToken, EmailAddress, IdentityClaims, UserId};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// Bad signature, malformed structure or missing claims.
        Invalid { message: String } => "token is invalid: {message}",
        /// Signature valid but the lifetime has elapsed.
        Expired => "token has expired",
        /// Signing failed while issuing.
        Encoding { message: String } => "token encoding failed: {message}",
    }
}

/// Produces signed tokens asserting an identity.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `subject` valid for [`crate::domain::TOKEN_LIFETIME`].
    fn issue(&self, subject: &UserId, email: &EmailAddress) -> Result<AccessToken, TokenError>;
}

/// Validates tokens produced by a matching [`TokenIssuer`].
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError>;
}
