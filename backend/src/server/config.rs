//! Assembled server configuration.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use evstations::inbound::http::auth_config::AuthSettings;
use evstations::outbound::persistence::DbPool;

/// Everything `create_server` needs, resolved before the listener binds.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) auth: AuthSettings,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, auth: AuthSettings) -> Self {
        Self {
            bind_addr,
            auth,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
