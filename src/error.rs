//! Error types for the payroll recalculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance handling and
//! payroll recalculation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Month;

/// The main error type for the payroll recalculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Use
/// [`EngineError::is_recoverable`] to distinguish per-employee, retryable
/// outcomes from fatal configuration or persistence failures.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::PolicyNotFound {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Compensation settings not found for employee 'emp_001'"
/// );
/// assert!(error.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No compensation policy exists for the employee; payroll for that
    /// employee is skipped, not failed.
    #[error("Compensation settings not found for employee '{employee_id}'")]
    PolicyNotFound {
        /// The employee whose policy is missing.
        employee_id: String,
    },

    /// The employee row itself was not found.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was looked up.
        employee_id: String,
    },

    /// No attendance record exists for the given employee and date.
    #[error("No attendance record for employee '{employee_id}' on {date}")]
    AttendanceNotFound {
        /// The employee the record was looked up for.
        employee_id: String,
        /// The date the record was looked up for.
        date: NaiveDate,
    },

    /// An attendance operation was rejected before any state mutation
    /// (weekend/holiday check-in, duplicate check-out, out-of-order times,
    /// duplicate record creation).
    #[error("Attendance rejected for employee '{employee_id}' on {date}: {message}")]
    PolicyViolation {
        /// The employee the operation targeted.
        employee_id: String,
        /// The date the operation targeted.
        date: NaiveDate,
        /// A description of the rejected operation.
        message: String,
    },

    /// A concurrent recalculation already inserted the payroll row for this
    /// (employee, month) pair. The caller may treat this as success or retry
    /// as an update.
    #[error("Payroll row already exists for employee '{employee_id}' in {month}")]
    PayrollExists {
        /// The employee the payroll row belongs to.
        employee_id: String,
        /// The month the payroll row covers.
        month: Month,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration content violated an invariant (duplicate holiday date,
    /// duplicate holiday name within a year, dangling policy reference).
    #[error("Invalid configuration: {message}")]
    ConfigInvalid {
        /// A description of the violated invariant.
        message: String,
    },

    /// An unexpected persistence failure. Carries the operation context for
    /// diagnosis and is never swallowed by fan-out isolation.
    #[error("Storage failure during {operation}: {message}")]
    Storage {
        /// The operation that failed (includes employee/month context).
        operation: String,
        /// A description of the underlying failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for per-employee, retryable outcomes that a fan-out may
    /// report and continue past; false for fatal configuration and
    /// persistence failures.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::ConfigInvalid { .. }
                | EngineError::Storage { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
