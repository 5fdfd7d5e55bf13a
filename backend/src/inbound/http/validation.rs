//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, StationId, StationValidationError};

/// Machine-readable validation codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidValue,
    InvalidUuid,
    InvalidRange,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidRange => "invalid_range",
        }
    }
}

/// Build a 400 error pointing at `field`.
pub(crate) fn field_error(
    message: impl Into<String>,
    field: &str,
    code: ValidationCode,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Parse a path segment into a station identifier.
pub(crate) fn parse_station_id(raw: &str) -> Result<StationId, Error> {
    raw.parse::<StationId>().map_err(|_| {
        field_error(
            "Invalid charging station id",
            "id",
            ValidationCode::InvalidUuid,
        )
    })
}

/// Map a station value failure onto the JSON field it came from.
pub(crate) fn station_value_error(err: StationValidationError) -> Error {
    let (field, code) = match &err {
        StationValidationError::InvalidId => ("id", ValidationCode::InvalidUuid),
        StationValidationError::EmptyName => ("name", ValidationCode::InvalidValue),
        StationValidationError::LatitudeOutOfRange { .. } => {
            ("location.latitude", ValidationCode::InvalidRange)
        }
        StationValidationError::LongitudeOutOfRange { .. } => {
            ("location.longitude", ValidationCode::InvalidRange)
        }
        StationValidationError::UnknownStatus { .. } => ("status", ValidationCode::InvalidValue),
        StationValidationError::InvalidPowerOutput { .. } => {
            ("powerOutput", ValidationCode::InvalidValue)
        }
        StationValidationError::EmptyConnectorType => {
            ("connectorType", ValidationCode::InvalidValue)
        }
        StationValidationError::InvalidPowerBound { .. } => {
            ("minPower", ValidationCode::InvalidValue)
        }
        StationValidationError::InvertedPowerRange => ("minPower", ValidationCode::InvalidRange),
    };
    field_error(err.to_string(), field, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn invalid_station_id_is_bad_request() {
        let err = parse_station_id("42").expect_err("not a uuid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_uuid"))
        );
    }

    #[rstest]
    #[case(StationValidationError::EmptyName, "name")]
    #[case(StationValidationError::LatitudeOutOfRange { value: 91.0 }, "location.latitude")]
    #[case(StationValidationError::InvertedPowerRange, "minPower")]
    fn value_errors_name_their_field(#[case] err: StationValidationError, #[case] field: &str) {
        let mapped = station_value_error(err);
        assert_eq!(
            mapped.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }
}
