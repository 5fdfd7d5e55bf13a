//! Identity assertion carried by bearer tokens.

use chrono::{DateTime, TimeDelta, Utc};

use super::{EmailAddress, UserId};

/// Fixed lifetime of an issued token.
pub const TOKEN_LIFETIME: TimeDelta = TimeDelta::days(1);

/// Decoded, verified claims attached to an authenticated request.
///
/// Validity depends only on the signature and `expires_at`: a token is
/// usable while `now < expires_at` and never after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    subject: UserId,
    email: EmailAddress,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl IdentityClaims {
    /// Build claims for `subject` issued at `issued_at` with the fixed lifetime.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use evstations::domain::{EmailAddress, IdentityClaims, TOKEN_LIFETIME, UserId};
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    /// let claims = IdentityClaims::issue(
    ///     UserId::random(),
    ///     EmailAddress::new("a@x.com").unwrap(),
    ///     now,
    /// );
    /// assert_eq!(claims.expires_at(), now + TOKEN_LIFETIME);
    /// assert!(claims.is_valid_at(now));
    /// assert!(!claims.is_valid_at(now + TOKEN_LIFETIME));
    /// ```
    pub fn issue(subject: UserId, email: EmailAddress, issued_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            email,
            issued_at,
            expires_at: issued_at + TOKEN_LIFETIME,
        }
    }

    /// Rebuild claims from decoded token fields.
    pub fn from_parts(
        subject: UserId,
        email: EmailAddress,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            email,
            issued_at,
            expires_at,
        }
    }

    /// Identity the token was issued for.
    pub fn subject(&self) -> &UserId {
        &self.subject
    }

    /// Email recorded at issuance.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the assertion is still within its lifetime at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
