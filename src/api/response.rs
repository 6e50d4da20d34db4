//! Response types for the HR payroll API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from [`HrError`] to HTTP status and machine-readable code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::HrError;
use crate::services::GenerationOutcome;

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
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
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
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Creates a 401 response for a request without a usable caller identity.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHENTICATED", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Returns the HTTP status and stable code for an error.
pub fn status_and_code(error: &HrError) -> (StatusCode, &'static str) {
    match error {
        HrError::AlreadyCheckedIn { .. } => (StatusCode::CONFLICT, "ALREADY_CHECKED_IN"),
        HrError::AlreadyCheckedOut { .. } => (StatusCode::CONFLICT, "ALREADY_CHECKED_OUT"),
        HrError::NoCheckInFound { .. } => (StatusCode::CONFLICT, "NO_CHECK_IN_FOUND"),
        HrError::CheckOutBeforeCheckIn { .. } => {
            (StatusCode::BAD_REQUEST, "CHECK_OUT_BEFORE_CHECK_IN")
        }
        HrError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "INVALID_PERIOD"),
        HrError::DuplicatePayrollPeriod { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_PAYROLL_PERIOD")
        }
        HrError::DuplicateAttendance { .. } => (StatusCode::CONFLICT, "DUPLICATE_ATTENDANCE"),
        HrError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
        HrError::NotLinkedToEmployee { .. } => (StatusCode::FORBIDDEN, "NOT_LINKED_TO_EMPLOYEE"),
        HrError::DuplicateEmployeeCode { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_EMPLOYEE_CODE")
        }
        HrError::UserAlreadyLinked { .. } => (StatusCode::CONFLICT, "USER_ALREADY_LINKED"),
        HrError::AttendanceNotFound { .. } => (StatusCode::NOT_FOUND, "ATTENDANCE_NOT_FOUND"),
        HrError::PayrollNotFound { .. } => (StatusCode::NOT_FOUND, "PAYROLL_NOT_FOUND"),
        HrError::PayrollFinalized { .. } => (StatusCode::CONFLICT, "PAYROLL_FINALIZED"),
        HrError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
        HrError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        HrError::ConfigNotFound { .. } | HrError::ConfigParseError { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
        }
    }
}

impl From<HrError> for ApiErrorResponse {
    fn from(error: HrError) -> Self {
        let (status, code) = status_and_code(&error);
        let error = match &error {
            HrError::ConfigNotFound { .. } | HrError::ConfigParseError { .. } => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            HrError::InvalidPeriod { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Year must be within the configured range and month between 1 and 12",
            ),
            _ => ApiError::new(code, error.to_string()),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body for `GET /health-check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// Server local time.
    pub timestamp: NaiveDateTime,
}

/// Response body for `POST /payroll-generation`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Period year.
    pub year: i32,
    /// Period month.
    pub month: u32,
    /// Records created by the run.
    pub generated: u32,
    /// Active employees that already had a record.
    pub skipped: u32,
}

impl From<GenerationOutcome> for GenerationResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            year: outcome.period.year,
            month: outcome.period.month,
            generated: outcome.generated,
            skipped: outcome.skipped,
        }
    }
}
