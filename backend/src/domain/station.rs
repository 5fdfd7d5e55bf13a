//! Charging station aggregate and its value types.
//!
//! Stations are owned by the user who created them (`created_by`) but any
//! authenticated user may read or modify them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Validation errors for station values and filters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationValidationError {
    #[error("station id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("latitude must be between -90 and 90, got {value}")]
    LatitudeOutOfRange { value: f64 },
    #[error("longitude must be between -180 and 180, got {value}")]
    LongitudeOutOfRange { value: f64 },
    #[error("status must be one of: active, inactive")]
    UnknownStatus { value: String },
    #[error("power output must be a positive number of kilowatts, got {value}")]
    InvalidPowerOutput { value: f64 },
    #[error("connector type must not be empty")]
    EmptyConnectorType,
    #[error("power bound must be a non-negative number, got {value}")]
    InvalidPowerBound { value: f64 },
    #[error("minPower must not exceed maxPower")]
    InvertedPowerRange,
}

/// Station identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(Uuid);

impl StationId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StationId {
    type Err = StationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StationValidationError::InvalidId)
    }
}

/// Non-blank station name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationName(String);

impl StationName {
    pub fn new(name: impl Into<String>) -> Result<Self, StationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StationValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// WGS84 coordinates.
///
/// ## Invariants
/// - `latitude` lies in `[-90, 90]`.
/// - `longitude` lies in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Validate and construct a location.
    ///
    /// # Examples
    /// ```
    /// use evstations::domain::GeoLocation;
    ///
    /// assert!(GeoLocation::new(51.5, -0.12).is_ok());
    /// assert!(GeoLocation::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, StationValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StationValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(StationValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Operational status of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationStatus {
    Active,
    Inactive,
}

impl StationStatus {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationStatus {
    type Err = StationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(StationValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Rated power output in kilowatts; finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PowerOutput(f64);

impl PowerOutput {
    pub fn new(kilowatts: f64) -> Result<Self, StationValidationError> {
        if !kilowatts.is_finite() || kilowatts <= 0.0 {
            return Err(StationValidationError::InvalidPowerOutput { value: kilowatts });
        }
        Ok(Self(kilowatts))
    }

    pub fn kilowatts(self) -> f64 {
        self.0
    }
}

/// Connector standard label, e.g. `CCS` or `Type 2`. Matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectorType(String);

impl ConnectorType {
    pub fn new(value: impl Into<String>) -> Result<Self, StationValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(StationValidationError::EmptyConnectorType);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ConnectorType {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Complete set of caller-supplied fields for a new station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDraft {
    pub name: StationName,
    pub location: GeoLocation,
    pub status: StationStatus,
    pub power_output: PowerOutput,
    pub connector_type: ConnectorType,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationPatch {
    pub name: Option<StationName>,
    pub location: Option<GeoLocation>,
    pub status: Option<StationStatus>,
    pub power_output: Option<PowerOutput>,
    pub connector_type: Option<ConnectorType>,
}

/// Persisted charging station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: StationName,
    location: GeoLocation,
    status: StationStatus,
    power_output: PowerOutput,
    connector_type: ConnectorType,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle used to rehydrate a [`Station`] from storage.
#[derive(Debug, Clone)]
pub struct StationRecord {
    pub id: StationId,
    pub draft: StationDraft,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Station {
    /// Create a brand new station owned by `created_by`.
    pub fn create(draft: StationDraft, created_by: UserId, now: DateTime<Utc>) -> Self {
        Self::from_record(StationRecord {
            id: StationId::random(),
            draft,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a stored station.
    pub fn from_record(record: StationRecord) -> Self {
        let StationRecord {
            id,
            draft,
            created_by,
            created_at,
            updated_at,
        } = record;
        let StationDraft {
            name,
            location,
            status,
            power_output,
            connector_type,
        } = draft;
        Self {
            id,
            name,
            location,
            status,
            power_output,
            connector_type,
            created_by,
            created_at,
            updated_at,
        }
    }

    /// Apply a partial update, bumping `updated_at` to `now`.
    ///
    /// The owner, identifier and creation time never change.
    #[must_use]
    pub fn apply(mut self, patch: StationPatch, now: DateTime<Utc>) -> Self {
        let StationPatch {
            name,
            location,
            status,
            power_output,
            connector_type,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(power_output) = power_output {
            self.power_output = power_output;
        }
        if let Some(connector_type) = connector_type {
            self.connector_type = connector_type;
        }
        self.updated_at = now;
        self
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn status(&self) -> StationStatus {
        self.status
    }

    pub fn power_output(&self) -> PowerOutput {
        self.power_output
    }

    pub fn connector_type(&self) -> &ConnectorType {
        &self.connector_type
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Listing filter. Every criterion is optional; bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    status: Option<StationStatus>,
    connector_type: Option<ConnectorType>,
    min_power: Option<f64>,
    max_power: Option<f64>,
}

impl StationFilter {
    /// Build a filter, validating the power bounds.
    ///
    /// # Examples
    /// ```
    /// use evstations::domain::{StationFilter, StationStatus};
    ///
    /// let filter = StationFilter::try_new(Some(StationStatus::Active), None, Some(50.0), None)
    ///     .unwrap();
    /// assert_eq!(filter.min_power(), Some(50.0));
    /// assert!(StationFilter::try_new(None, None, Some(100.0), Some(50.0)).is_err());
    /// ```
    pub fn try_new(
        status: Option<StationStatus>,
        connector_type: Option<ConnectorType>,
        min_power: Option<f64>,
        max_power: Option<f64>,
    ) -> Result<Self, StationValidationError> {
        for bound in [min_power, max_power].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(StationValidationError::InvalidPowerBound { value: bound });
            }
        }
        if matches!((min_power, max_power), (Some(min), Some(max)) if min > max) {
            return Err(StationValidationError::InvertedPowerRange);
        }
        Ok(Self {
            status,
            connector_type,
            min_power,
            max_power,
        })
    }

    pub fn status(&self) -> Option<StationStatus> {
        self.status
    }

    pub fn connector_type(&self) -> Option<&ConnectorType> {
        self.connector_type.as_ref()
    }

    pub fn min_power(&self) -> Option<f64> {
        self.min_power
    }

    pub fn max_power(&self) -> Option<f64> {
        self.max_power
    }

    /// Whether `station` satisfies every configured criterion.
    pub fn matches(&self, station: &Station) -> bool {
        let power = station.power_output().kilowatts();
        self.status.is_none_or(|status| station.status() == status)
            && self
                .connector_type
                .as_ref()
                .is_none_or(|connector| station.connector_type() == connector)
            && self.min_power.is_none_or(|min| power >= min)
            && self.max_power.is_none_or(|max| power <= max)
    }
}
