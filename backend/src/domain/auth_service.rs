//! Registration and login use cases.
//!
//! [`AuthenticationService`] implements the [`AuthService`] driving port by
//! orchestrating the credential store, the password hasher and the token
//! issuer. Failures from driven ports are logged here and surfaced as fixed
//! generic messages; their detail never reaches the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AuthService, PasswordHasher, TokenIssuer, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, AuthSession, Error, LoginCredentials, RegistrationDetails, User, UserAccount,
    UserId,
};

const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const REGISTRATION_FAILED_MESSAGE: &str = "Error during registration";
const USER_CREATION_FAILED_MESSAGE: &str = "Error creating user";
const LOGIN_FAILED_MESSAGE: &str = "Error during login";

/// Authentication service backed by driven ports.
pub struct AuthenticationService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> Clone for AuthenticationService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AuthenticationService<U, H, T> {
    /// Create a service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AuthenticationService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    fn issue_token(&self, user: &User, failure_message: &'static str) -> Result<AccessToken, Error> {
        self.tokens.issue(user.id(), user.email()).map_err(|err| {
            error!(error = %err, user_id = %user.id(), "token issuance failed");
            Error::internal(failure_message)
        })
    }

    fn map_insert_error(err: UserPersistenceError) -> Error {
        match err {
            UserPersistenceError::DuplicateEmail => {
                warn!("registration lost a race on a duplicate email");
                Error::conflict(DUPLICATE_EMAIL_MESSAGE)
            }
            other => {
                error!(error = %other, "user insert failed");
                Error::internal(USER_CREATION_FAILED_MESSAGE)
            }
        }
    }
}

#[async_trait]
impl<U, H, T> AuthService for AuthenticationService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn register(&self, details: RegistrationDetails) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(|err| {
                error!(error = %err, "user lookup failed during registration");
                Error::internal(REGISTRATION_FAILED_MESSAGE)
            })?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing failed during registration");
                Error::internal(REGISTRATION_FAILED_MESSAGE)
            })?;

        let user = User::new(
            UserId::random(),
            details.email().clone(),
            Some(details.display_name().clone()),
        );
        let account = UserAccount::new(user, password_hash);
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_insert_error)?;

        let user = account.into_user();
        let token = self.issue_token(&user, REGISTRATION_FAILED_MESSAGE)?;
        info!(user_id = %user.id(), "user registered");
        Ok(AuthSession::new(user, token))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| {
                error!(error = %err, "user lookup failed during login");
                Error::internal(LOGIN_FAILED_MESSAGE)
            })?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;

        if !self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
        {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let user = account.into_user();
        let token = self.issue_token(&user, LOGIN_FAILED_MESSAGE)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(AuthSession::new(user, token))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
