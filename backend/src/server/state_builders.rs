//! Wiring of adapters and services into the HTTP state.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use evstations::domain::ports::{StationRepository, UserRepository};
use evstations::domain::{AuthenticationService, StationService};
use evstations::inbound::http::state::HttpState;
use evstations::outbound::crypto::{BcryptPasswordHasher, JwtTokenService};
use evstations::outbound::memory::{InMemoryStationRepository, InMemoryUserRepository};
use evstations::outbound::persistence::{DbPool, DieselStationRepository, DieselUserRepository};

use super::ServerConfig;

type Repositories = (Arc<dyn UserRepository>, Arc<dyn StationRepository>);

fn build_repositories(pool: Option<&DbPool>) -> Repositories {
    match pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselStationRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; accounts and stations live in process memory");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryStationRepository::new()),
            )
        }
    }
}

/// Build the handler state from configuration.
///
/// One [`JwtTokenService`] serves as both issuer (for the auth service) and
/// verifier (for the bearer gate), so both sides share the secret.
pub(crate) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let (users, stations) = build_repositories(config.db_pool.as_ref());
    let tokens = Arc::new(JwtTokenService::new(
        config.auth.secret.expose(),
        Arc::clone(&clock),
    ));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost));

    let auth = AuthenticationService::new(users, hasher, Arc::clone(&tokens));
    let station_service = Arc::new(StationService::new(stations, clock));

    HttpState::new(
        Arc::new(auth),
        station_service.clone(),
        station_service,
        tokens,
    )
}
