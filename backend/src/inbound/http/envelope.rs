//! Response envelopes shared by every endpoint.
//!
//! Success: `{"success": true, "data": ...}`.
//! Failure: `{"success": false, "error": "<reason>", "code", "message", "traceId"?}`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::schemas::ErrorCodeSchema;

/// Successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// `200 OK` with the wrapped payload.
    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(data))
    }

    /// `201 Created` with the wrapped payload.
    pub fn created(data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::new(data))
    }
}

/// Failed response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub success: bool,
    /// Canonical reason phrase of the status, e.g. `Unauthorized`.
    #[schema(example = "Bad Request")]
    pub error: String,
    #[schema(value_type = ErrorCodeSchema)]
    pub code: ErrorCode,
    #[schema(example = "All fields are required")]
    pub message: String,
    /// Correlates the failure with server logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field-level context for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, error: &Error) -> Self {
        Self {
            success: false,
            error: status.canonical_reason().unwrap_or("Error").to_owned(),
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: error.trace_id().map(str::to_owned),
            details: error.details().cloned(),
        }
    }
}
