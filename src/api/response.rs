//! Response types for the payroll engine API.
//!
//! This module defines the success payloads that need shaping beyond the
//! domain models, the error body, and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{DailyWageResult, round_to_cents};
use crate::error::EngineError;
use crate::models::{AuditTrace, PayComponents};

/// Response body for `POST /wage/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagePreviewResponse {
    /// The contract the hours were priced under.
    pub contract_id: Uuid,
    /// Gross pay for the day, rounded to cents.
    pub wage: Decimal,
    /// The pay components, each rounded to cents.
    pub components: PayComponents,
    /// The hourly-equivalent rate premiums were priced against.
    pub hourly_equivalent_rate: Decimal,
    /// The calculation steps and timing.
    pub audit_trace: AuditTrace,
}

impl WagePreviewResponse {
    /// Builds the response from an exact calculator result.
    pub fn new(contract_id: Uuid, result: DailyWageResult, duration_us: u64) -> Self {
        Self {
            contract_id,
            wage: round_to_cents(result.wage),
            components: result.components.rounded(),
            hourly_equivalent_rate: result.hourly_equivalent_rate.normalize(),
            audit_trace: AuditTrace {
                steps: result.audit_steps,
                duration_us,
            },
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Whether the same request may succeed if retried.
    pub retryable: bool,
}

impl ApiError {
    /// Creates a new, non-retryable API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Marks the error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body as a 400 Bad Request.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let retryable = error.is_retryable();

        let (status, error) = match error {
            EngineError::InvalidContractType { value } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_CONTRACT_TYPE",
                    message,
                    format!("'{}' is not one of hourly, daily, monthly", value),
                ),
            ),
            EngineError::InvalidHours { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_HOURS",
                    message,
                    "Hours must be finite and not negative",
                ),
            ),
            EngineError::InvalidContract { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CONTRACT", message),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_PERIOD", message, "Month must be 1 to 12"),
            ),
            EngineError::AmountOverflow { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    message,
                    "Hours or pay terms are too large to price",
                ),
            ),
            EngineError::ContractNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("CONTRACT_NOT_FOUND", message),
            ),
            EngineError::Conflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("CONFLICT", message),
            ),
            EngineError::StoreUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORE_UNAVAILABLE", message),
            ),
            EngineError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
        };

        let error = if retryable { error.retryable() } else { error };
        ApiErrorResponse { status, error }
    }
}
