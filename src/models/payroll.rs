//! Payroll model.
//!
//! Exactly one payroll row per `(employee_id, month)`. The row is created on
//! first recalculation and thereafter only ever updated in place; the store's
//! uniqueness constraint backs that lifecycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

/// One employee's computed payroll for one month.
///
/// Invariants maintained by the recalculation engine: `net_salary >= 0` and
/// `absent_days` is `business_days_in_month - attended_days` floored at zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Month, Payroll};
/// use rust_decimal::Decimal;
///
/// let payroll = Payroll {
///     employee_id: "emp_001".to_string(),
///     month: Month::new(2025, 5).unwrap(),
///     business_days_in_month: 22,
///     attended_days: 20,
///     absent_days: 2,
///     total_late_hours: Decimal::ZERO,
///     total_overtime_hours: Decimal::ZERO,
///     late_deduction_amount: Decimal::ZERO,
///     overtime_bonus_amount: Decimal::ZERO,
///     net_salary: Decimal::new(200000, 2), // 2000.00
/// };
/// assert_eq!(payroll.attended_days + payroll.absent_days, payroll.business_days_in_month);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    /// The employee this row belongs to.
    pub employee_id: String,
    /// The month this row covers.
    pub month: Month,
    /// Business days in the month for this employee's weekend configuration.
    pub business_days_in_month: u32,
    /// Distinct dates in the month with an attendance record.
    pub attended_days: u32,
    /// Business days with no attendance record, floored at zero.
    pub absent_days: u32,
    /// Sum of late hours over the month's records.
    pub total_late_hours: Decimal,
    /// Sum of overtime hours over the month's records.
    pub total_overtime_hours: Decimal,
    /// The deduction for lateness, rounded to 2 decimal places.
    pub late_deduction_amount: Decimal,
    /// The bonus for overtime, rounded to 2 decimal places.
    pub overtime_bonus_amount: Decimal,
    /// The final pay figure, never negative, rounded to 2 decimal places.
    pub net_salary: Decimal,
}
