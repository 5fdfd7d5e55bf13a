//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token backend) expose strongly typed
//! errors so adapters map their failures into predictable variants. Driving
//! ports (auth service, station command/query) speak [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod identity_tokens;
mod password_hasher;
mod station_repository;
mod stations_command;
mod stations_query;
mod user_repository;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::AuthService;
#[cfg(test)]
pub use identity_tokens::{MockTokenIssuer, MockTokenVerifier};
pub use identity_tokens::{TokenError, TokenIssuer, TokenVerifier};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use station_repository::MockStationRepository;
pub use station_repository::{StationPersistenceError, StationRepository};
#[cfg(test)]
pub use stations_command::MockStationsCommand;
pub use stations_command::StationsCommand;
#[cfg(test)]
pub use stations_query::MockStationsQuery;
pub use stations_query::StationsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
