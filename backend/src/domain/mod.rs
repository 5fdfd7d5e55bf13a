//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services that orchestrate them through ports. Types
//! validate on construction and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - User, UserAccount and their value types.
//! - LoginCredentials, RegistrationDetails, AccessToken, AuthSession.
//! - IdentityClaims: verified bearer token assertion.
//! - Station and its value types, drafts, patches and filters.
//! - AuthenticationService and StationService: port-driven use cases.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod identity;
pub mod ports;
pub mod station;
pub mod station_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, AuthSession, CredentialField, LoginCredentials, LoginValidationError,
    RegistrationDetails, RegistrationValidationError,
};
pub use self::auth_service::AuthenticationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{IdentityClaims, TOKEN_LIFETIME};
pub use self::station::{
    ConnectorType, GeoLocation, PowerOutput, Station, StationDraft, StationFilter, StationId,
    StationName, StationPatch, StationRecord, StationStatus, StationValidationError,
};
pub use self::station_service::StationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use evstations::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Charging station not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
