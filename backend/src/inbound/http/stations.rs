//! Charging station handlers.
//!
//! Every route here sits behind [`crate::inbound::http::bearer::RequireBearer`].
//!
//! ```text
//! POST   /api/stations
//! GET    /api/stations?status=active&connectorType=CCS&minPower=50&maxPower=350
//! GET    /api/stations/{id}
//! PUT    /api/stations/{id}
//! DELETE /api/stations/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ConnectorType, Error, GeoLocation, PowerOutput, Station, StationDraft, StationFilter,
    StationName, StationPatch, StationStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{ApiResponse, ErrorEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ValidationCode, field_error, parse_station_id, station_value_error,
};

const ALL_FIELDS_REQUIRED_MESSAGE: &str = "All fields are required";
const DELETED_MESSAGE: &str = "Charging station deleted successfully";
const STATUS_ALL: &str = "all";

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct LocationDto {
    #[schema(example = 51.5072)]
    pub latitude: f64,
    #[schema(example = 0.1276)]
    pub longitude: f64,
}

impl TryFrom<LocationDto> for GeoLocation {
    type Error = Error;

    fn try_from(value: LocationDto) -> Result<Self, Self::Error> {
        GeoLocation::new(value.latitude, value.longitude).map_err(station_value_error)
    }
}

impl From<GeoLocation> for LocationDto {
    fn from(value: GeoLocation) -> Self {
        Self {
            latitude: value.latitude(),
            longitude: value.longitude(),
        }
    }
}

/// Body for `POST /api/stations`. Every field is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStationRequest {
    #[schema(example = "Harbour Supercharger")]
    pub name: Option<String>,
    pub location: Option<LocationDto>,
    #[schema(example = "active")]
    pub status: Option<String>,
    #[schema(example = 150.0)]
    pub power_output: Option<f64>,
    #[schema(example = "CCS")]
    pub connector_type: Option<String>,
}

/// Body for `PUT /api/stations/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStationRequest {
    pub name: Option<String>,
    pub location: Option<LocationDto>,
    pub status: Option<String>,
    pub power_output: Option<f64>,
    pub connector_type: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, Error> {
    value.ok_or_else(|| {
        field_error(
            ALL_FIELDS_REQUIRED_MESSAGE,
            field,
            ValidationCode::MissingField,
        )
    })
}

fn parse_status(raw: &str) -> Result<StationStatus, Error> {
    raw.parse::<StationStatus>().map_err(station_value_error)
}

impl TryFrom<CreateStationRequest> for StationDraft {
    type Error = Error;

    fn try_from(value: CreateStationRequest) -> Result<Self, Self::Error> {
        let name = required(value.name, "name")?;
        let location = required(value.location, "location")?;
        let status = required(value.status, "status")?;
        let power_output = required(value.power_output, "powerOutput")?;
        let connector_type = required(value.connector_type, "connectorType")?;

        Ok(Self {
            name: StationName::new(name).map_err(station_value_error)?,
            location: location.try_into()?,
            status: parse_status(&status)?,
            power_output: PowerOutput::new(power_output).map_err(station_value_error)?,
            connector_type: ConnectorType::new(connector_type).map_err(station_value_error)?,
        })
    }
}

impl TryFrom<UpdateStationRequest> for StationPatch {
    type Error = Error;

    fn try_from(value: UpdateStationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value
                .name
                .map(StationName::new)
                .transpose()
                .map_err(station_value_error)?,
            location: value.location.map(GeoLocation::try_from).transpose()?,
            status: value.status.as_deref().map(parse_status).transpose()?,
            power_output: value
                .power_output
                .map(PowerOutput::new)
                .transpose()
                .map_err(station_value_error)?,
            connector_type: value
                .connector_type
                .map(ConnectorType::new)
                .transpose()
                .map_err(station_value_error)?,
        })
    }
}

/// Query string for `GET /api/stations`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListStationsQuery {
    /// `active`, `inactive` or `all`; absent means `all`.
    pub status: Option<String>,
    /// Exact connector type match.
    pub connector_type: Option<String>,
    /// Inclusive lower bound on power output in kW.
    pub min_power: Option<f64>,
    /// Inclusive upper bound on power output in kW.
    pub max_power: Option<f64>,
}

impl TryFrom<ListStationsQuery> for StationFilter {
    type Error = Error;

    fn try_from(value: ListStationsQuery) -> Result<Self, Self::Error> {
        let status = match value.status.as_deref().map(str::trim) {
            None | Some("") | Some(STATUS_ALL) => None,
            Some(raw) => Some(parse_status(raw)?),
        };
        let connector_type = value
            .connector_type
            .filter(|raw| !raw.trim().is_empty())
            .map(ConnectorType::new)
            .transpose()
            .map_err(station_value_error)?;
        StationFilter::try_new(status, connector_type, value.min_power, value.max_power)
            .map_err(station_value_error)
    }
}

/// Station as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    #[schema(example = "0b9f6c1e-7a43-4a4e-9d59-1f6b1f4c2d10")]
    pub id: String,
    pub name: String,
    pub location: LocationDto,
    #[schema(example = "active")]
    pub status: String,
    pub power_output: f64,
    pub connector_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id().to_string(),
            name: station.name().as_ref().to_owned(),
            location: station.location().into(),
            status: station.status().as_str().to_owned(),
            power_output: station.power_output().kilowatts(),
            connector_type: station.connector_type().as_ref().to_owned(),
            created_at: station.created_at(),
            updated_at: station.updated_at(),
        }
    }
}

/// `data` payload for single-station responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationEnvelope {
    pub station: StationResponse,
}

impl From<&Station> for StationEnvelope {
    fn from(station: &Station) -> Self {
        Self {
            station: station.into(),
        }
    }
}

/// `data` payload for listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationListEnvelope {
    pub stations: Vec<StationResponse>,
}

/// `data` payload for deletions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
}

/// Create a charging station owned by the caller.
#[utoipa::path(
    post,
    path = "/api/stations",
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = StationEnvelope),
        (status = 400, description = "Missing or invalid fields", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["stations"],
    operation_id = "createStation",
    security(("BearerAuth" = []))
)]
#[post("")]
pub async fn create_station(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateStationRequest>,
) -> ApiResult<HttpResponse> {
    let draft = StationDraft::try_from(payload.into_inner())?;
    let station = state.stations.create(user.id(), draft).await?;
    Ok(ApiResponse::created(StationEnvelope::from(&station)))
}

/// List stations matching the optional filters.
#[utoipa::path(
    get,
    path = "/api/stations",
    params(ListStationsQuery),
    responses(
        (status = 200, description = "Stations", body = StationListEnvelope),
        (status = 400, description = "Invalid filter", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["stations"],
    operation_id = "listStations",
    security(("BearerAuth" = []))
)]
#[get("")]
pub async fn list_stations(
    state: web::Data<HttpState>,
    query: web::Query<ListStationsQuery>,
) -> ApiResult<HttpResponse> {
    let filter = StationFilter::try_from(query.into_inner())?;
    let stations = state.stations_query.list(filter).await?;
    Ok(ApiResponse::ok(StationListEnvelope {
        stations: stations.iter().map(StationResponse::from).collect(),
    }))
}

/// Fetch one station.
#[utoipa::path(
    get,
    path = "/api/stations/{id}",
    params(("id" = String, Path, description = "Station identifier")),
    responses(
        (status = 200, description = "Station", body = StationEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["stations"],
    operation_id = "getStation",
    security(("BearerAuth" = []))
)]
#[get("/{id}")]
pub async fn get_station(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_station_id(&path)?;
    let station = state.stations_query.get(&id).await?;
    Ok(ApiResponse::ok(StationEnvelope::from(&station)))
}

/// Merge supplied fields over a stored station.
#[utoipa::path(
    put,
    path = "/api/stations/{id}",
    params(("id" = String, Path, description = "Station identifier")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Updated station", body = StationEnvelope),
        (status = 400, description = "Malformed id or invalid fields", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["stations"],
    operation_id = "updateStation",
    security(("BearerAuth" = []))
)]
#[put("/{id}")]
pub async fn update_station(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStationRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_station_id(&path)?;
    let patch = StationPatch::try_from(payload.into_inner())?;
    let station = state.stations.update(&id, patch).await?;
    Ok(ApiResponse::ok(StationEnvelope::from(&station)))
}

/// Remove a station.
#[utoipa::path(
    delete,
    path = "/api/stations/{id}",
    params(("id" = String, Path, description = "Station identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["stations"],
    operation_id = "deleteStation",
    security(("BearerAuth" = []))
)]
#[delete("/{id}")]
pub async fn delete_station(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_station_id(&path)?;
    state.stations.delete(&id).await?;
    Ok(ApiResponse::ok(MessageEnvelope {
        message: DELETED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
#[path = "stations_tests.rs"]
mod tests;
