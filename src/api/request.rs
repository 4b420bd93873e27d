//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the attendance,
//! holiday, and payroll endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceStatus, Month};

/// Request body for `POST /attendance/check-in` and
/// `POST /attendance/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking in or out.
    pub employee_id: String,
    /// The date of the event.
    pub date: NaiveDate,
    /// The wall-clock time of the event.
    pub time: NaiveTime,
}

/// Request body for the administrative record endpoints
/// (`POST`/`PUT /attendance/records`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The date of the record.
    pub date: NaiveDate,
    /// The check-in time; must be strictly before the check-out time.
    pub check_in_time: NaiveTime,
    /// The check-out time.
    pub check_out_time: NaiveTime,
    /// The status tag; defaults to `present`.
    #[serde(default = "default_status")]
    pub status: AttendanceStatus,
}

fn default_status() -> AttendanceStatus {
    AttendanceStatus::Present
}

/// Request body for `DELETE /attendance/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRecordRequest {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The date of the record to delete.
    pub date: NaiveDate,
}

/// Request body for `POST /attendance/sweep`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    /// The date to sweep; the scheduler supplies "today".
    pub date: NaiveDate,
}

/// Request body for `POST /holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday; unique within its calendar year.
    pub name: String,
}

/// Request body for `POST /payroll/recalculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateRequest {
    /// The employee to recalculate.
    pub employee_id: String,
    /// The month to recalculate, as a `"YYYY-MM"` key.
    pub month: Month,
}
