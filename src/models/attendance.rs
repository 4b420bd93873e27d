//! Attendance record model.
//!
//! One record per `(employee_id, date)`: check-in/check-out times (each
//! independently nullable), the derived late/overtime durations, and a status
//! tag.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The status tag on an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee checked in on this date.
    Present,
    /// Created by the absentee sweep: a business day with no check-in.
    Absent,
    /// Manually overridden by an administrator (approved leave and similar).
    Excused,
}

/// A single day's attendance for one employee.
///
/// Check-in may exist without check-out and vice versa: a record created by
/// check-in has no check-out time until the employee leaves, and a record
/// created by the absentee sweep has neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The actual check-in time, if the employee checked in.
    pub check_in_time: Option<NaiveTime>,
    /// The actual check-out time, if the employee checked out.
    pub check_out_time: Option<NaiveTime>,
    /// Hours arrived after the default check-in time; never negative.
    pub late_hours: Decimal,
    /// Hours worked past the default check-out time; never negative.
    pub overtime_hours: Decimal,
    /// The status tag for this date.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// A record created by the absentee sweep: no times, zero durations.
    pub fn absent(employee_id: &str, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            check_in_time: None,
            check_out_time: None,
            late_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            status: AttendanceStatus::Absent,
        }
    }
}
