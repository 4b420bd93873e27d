//! Employee model.
//!
//! This module defines the Employee struct supplied by the HR system of
//! record. Salary and working-hours changes on this entity are recalculation
//! triggers.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose attendance feeds payroll recalculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     salary: Decimal::new(3000, 0),
///     working_hours_per_day: 8,
///     default_check_in_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     default_check_out_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// };
/// assert_eq!(employee.working_hours_per_day, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly salary in currency units.
    pub salary: Decimal,
    /// Scheduled working hours per day; a zero value yields a zero hourly
    /// rate rather than a division error.
    pub working_hours_per_day: u32,
    /// The time of day the employee is expected to check in.
    pub default_check_in_time: NaiveTime,
    /// The time of day the employee is expected to check out.
    pub default_check_out_time: NaiveTime,
}
