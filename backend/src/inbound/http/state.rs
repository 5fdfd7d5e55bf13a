//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, StationsCommand, StationsQuery, TokenVerifier};

/// Dependency bundle for HTTP handlers and the bearer gate.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub stations: Arc<dyn StationsCommand>,
    pub stations_query: Arc<dyn StationsQuery>,
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        stations: Arc<dyn StationsCommand>,
        stations_query: Arc<dyn StationsQuery>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            auth,
            stations,
            stations_query,
            tokens,
        }
    }
}
