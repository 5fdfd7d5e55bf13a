//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod auth_config;
pub mod bearer;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod stations;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use self::bearer::RequireBearer;
use self::error::{json_error_handler, path_error_handler, query_error_handler};
use self::state::HttpState;

/// Register the `/api` surface: open auth routes plus the gated station
/// routes, with extractor failures rewritten into the error envelope.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use evstations::inbound::http::{configure_api, state::HttpState};
///
/// fn app(state: web::Data<HttpState>) {
///     let _ = App::new().configure(|cfg| configure_api(cfg, state));
/// }
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let gate = RequireBearer::new(state.tokens.clone());
    cfg.app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/api/stations")
                .wrap(gate)
                .service(stations::create_station)
                .service(stations::list_stations)
                .service(stations::get_station)
                .service(stations::update_station)
                .service(stations::delete_station),
        );
}
