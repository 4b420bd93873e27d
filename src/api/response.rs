//! Response types for the payroll engine API.
//!
//! This module defines the success envelopes, the error response structure,
//! and the mapping from [`EngineError`] onto HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, Holiday, Payroll};

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a holiday uniqueness conflict response.
    pub fn holiday_conflict(message: impl Into<String>) -> Self {
        Self::new("HOLIDAY_CONFLICT", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::PolicyNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "POLICY_NOT_FOUND",
                    format!(
                        "Compensation settings not found for employee '{}'",
                        employee_id
                    ),
                    "Payroll cannot be computed without a compensation policy",
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EMPLOYEE_NOT_FOUND",
                    format!("Employee not found: {}", employee_id),
                ),
            },
            EngineError::AttendanceNotFound { employee_id, date } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "ATTENDANCE_NOT_FOUND",
                    format!(
                        "No attendance record for employee '{}' on {}",
                        employee_id, date
                    ),
                ),
            },
            EngineError::PolicyViolation {
                employee_id,
                date,
                message,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "POLICY_VIOLATION",
                    format!(
                        "Attendance rejected for employee '{}' on {}",
                        employee_id, date
                    ),
                    message,
                ),
            },
            EngineError::PayrollExists { employee_id, month } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "PAYROLL_EXISTS",
                    format!(
                        "Payroll row already exists for employee '{}' in {}",
                        employee_id, month
                    ),
                    "A concurrent recalculation already produced this row",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::ConfigInvalid { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    message,
                ),
            },
            EngineError::Storage { operation, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    format!("Storage failure during {}", operation),
                    message,
                ),
            },
        }
    }
}

/// Response body for attendance write endpoints.
///
/// Carries the written record and, when the triggered recalculation for the
/// record's `(employee, month)` pair succeeded, the refreshed payroll row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// The attendance record after the write.
    pub record: AttendanceRecord,
    /// The recalculated payroll for the record's month, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payroll: Option<Payroll>,
}

/// A per-employee failure inside an absentee sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFailure {
    /// The employee the sweep skipped.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub message: String,
}

/// Response body for `POST /attendance/sweep`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    /// The date the sweep covered.
    pub date: NaiveDate,
    /// Employees marked absent by this sweep.
    pub marked: Vec<String>,
    /// Employees the sweep skipped, with reasons.
    pub failures: Vec<SweepFailure>,
    /// How many payroll rows were recalculated after the sweep.
    pub recalculated: usize,
}

/// Summary of a trigger fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutSummary {
    /// Pairs recalculated successfully.
    pub recalculated: usize,
    /// Pairs whose recalculation failed; each failure was isolated.
    pub failed: usize,
}

/// Response body for the holiday register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    /// The holiday after the mutation (the removed one for deletes).
    pub holiday: Holiday,
    /// The payroll fan-out triggered by the mutation.
    pub fan_out: FanOutSummary,
}
