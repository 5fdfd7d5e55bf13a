//! OpenAPI document for the REST API.
//!
//! Registers the auth, station and health paths, the wire schemas and the
//! `BearerAuth` security scheme. Served through Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::envelope::ErrorEnvelope;
use crate::inbound::http::schemas::ErrorCodeSchema;
use crate::inbound::http::stations::{
    CreateStationRequest, LocationDto, MessageEnvelope, StationEnvelope, StationListEnvelope,
    StationResponse, UpdateStationRequest,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EV charging stations API",
        description = "Account registration, bearer authentication and charging station management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::stations::create_station,
        crate::inbound::http::stations::list_stations,
        crate::inbound::http::stations::get_station,
        crate::inbound::http::stations::update_station,
        crate::inbound::http::stations::delete_station,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        AuthResponse,
        LocationDto,
        CreateStationRequest,
        UpdateStationRequest,
        StationResponse,
        StationEnvelope,
        StationListEnvelope,
        MessageEnvelope,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "stations", description = "Charging station management"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
