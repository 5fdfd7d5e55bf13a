//! Authentication primitives: login credentials, registration details and
//! the session returned to a caller once an identity is proven.
//!
//! Constructors validate raw string inputs so handlers never pass unchecked
//! payloads to a port or service. Plaintext passwords are held in
//! [`Zeroizing`] buffers and never implement `Display`.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, User};

/// Field that failed the "required" check on an auth payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Name,
    Email,
    Password,
}

impl CredentialField {
    /// JSON field name as it appears in request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Domain error returned when login payload values are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must not be empty")]
    MissingEmail,
    #[error("password must not be empty")]
    MissingPassword,
}

impl LoginValidationError {
    /// Field that triggered the failure.
    pub fn field(&self) -> CredentialField {
        match self {
            Self::MissingEmail => CredentialField::Email,
            Self::MissingPassword => CredentialField::Password,
        }
    }
}

/// Domain error returned when registration payload values are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("name must not be empty")]
    MissingName,
    #[error("email must not be empty")]
    MissingEmail,
    #[error("password must not be empty")]
    MissingPassword,
}

impl RegistrationValidationError {
    /// Field that triggered the failure.
    pub fn field(&self) -> CredentialField {
        match self {
            Self::MissingName => CredentialField::Name,
            Self::MissingEmail => CredentialField::Email,
            Self::MissingPassword => CredentialField::Password,
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is non-blank and kept exactly as supplied.
/// - `password` is non-empty; surrounding whitespace is significant.
///
/// # Examples
/// ```
/// use evstations::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@x.com", "p").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@x.com");
/// assert_eq!(creds.password(), "p");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::MissingEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the identity lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext candidate password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use evstations::domain::RegistrationDetails;
///
/// let details = RegistrationDetails::try_from_parts("A", "a@x.com", "p").unwrap();
/// assert_eq!(details.display_name().as_ref(), "A");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    display_name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Construct registration details from raw inputs.
    ///
    /// Fields are checked in payload order: name, email, password.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let display_name =
            DisplayName::new(name).map_err(|_| RegistrationValidationError::MissingName)?;
        let email =
            EmailAddress::new(email).map_err(|_| RegistrationValidationError::MissingEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingPassword);
        }

        Ok(Self {
            display_name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name to record on the new identity.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Email to register.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for RegistrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDetails")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    user: User,
    token: AccessToken,
}

impl AuthSession {
    /// Pair an identity with the token issued for it.
    pub fn new(user: User, token: AccessToken) -> Self {
        Self { user, token }
    }

    /// Authenticated identity.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Issued token.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Split into identity and token.
    pub fn into_parts(self) -> (User, AccessToken) {
        (self.user, self.token)
    }
}
