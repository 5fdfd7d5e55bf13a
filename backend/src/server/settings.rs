//! Server settings loaded through OrthoConfig.
//!
//! Values come from CLI flags, `EVSTATIONS_*` environment variables and an
//! optional config file. Secrets are not read here; see
//! `evstations::inbound::http::auth_config`.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the HTTP server and its stores.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVSTATIONS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("evstations")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("EVSTATIONS_BIND_ADDR", None::<String>),
            ("EVSTATIONS_DATABASE_URL", None::<String>),
            ("EVSTATIONS_DB_MAX_CONNECTIONS", None::<String>),
            ("EVSTATIONS_RUN_MIGRATIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), 10);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EVSTATIONS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "EVSTATIONS_DATABASE_URL",
                Some("postgres://localhost/evstations".to_owned()),
            ),
            ("EVSTATIONS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("EVSTATIONS_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/evstations")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            db_max_connections: None,
            run_migrations: true,
        };
        assert!(settings.bind_addr().is_err());
    }
}
