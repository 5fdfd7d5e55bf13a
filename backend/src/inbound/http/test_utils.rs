//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test as actix_test;
use serde_json::Value;

use crate::domain::ports::{
    AuthService, MockAuthService, MockStationsCommand, MockStationsQuery, MockTokenVerifier,
    StationsCommand, StationsQuery, TokenVerifier,
};
use crate::inbound::http::state::HttpState;

/// Assemble an [`HttpState`] from mocks, defaulting to doubles with no
/// expectations so any unexpected call fails the test.
#[derive(Default)]
pub struct HttpStateBuilder {
    auth: Option<Arc<dyn AuthService>>,
    stations: Option<Arc<dyn StationsCommand>>,
    stations_query: Option<Arc<dyn StationsQuery>>,
    tokens: Option<Arc<dyn TokenVerifier>>,
}

impl HttpStateBuilder {
    pub fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    pub fn stations(mut self, stations: MockStationsCommand) -> Self {
        self.stations = Some(Arc::new(stations));
        self
    }

    pub fn stations_query(mut self, query: MockStationsQuery) -> Self {
        self.stations_query = Some(Arc::new(query));
        self
    }

    pub fn tokens(mut self, tokens: MockTokenVerifier) -> Self {
        self.tokens = Some(Arc::new(tokens));
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(
            self.auth.unwrap_or_else(|| Arc::new(MockAuthService::new())),
            self.stations
                .unwrap_or_else(|| Arc::new(MockStationsCommand::new())),
            self.stations_query
                .unwrap_or_else(|| Arc::new(MockStationsQuery::new())),
            self.tokens
                .unwrap_or_else(|| Arc::new(MockTokenVerifier::new())),
        )
    }
}

/// Read a response body as JSON.
pub async fn read_json<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}
