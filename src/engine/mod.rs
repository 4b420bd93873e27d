//! Payroll recalculation engine.
//!
//! This module turns one employee's attendance for one month, their
//! compensation policy, and the business calendar into the single payroll row
//! for that `(employee, month)` pair. Recalculation is an idempotent upsert:
//! re-running it with unchanged inputs produces identical field values and
//! never a second row.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calendar::{business_days_in_month, resolve_weekend_days, CalendarWarning};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, CompensationPolicy, Employee, Month, Payroll};
use crate::store::Store;

/// The fixed divisor turning a monthly salary into a daily rate.
///
/// Deliberately not the month's actual day count: the daily rate divides by a
/// flat 30 regardless of month length, while day *counting* elsewhere uses
/// true calendar arithmetic. Changing this silently would alter every
/// historical payroll figure.
pub const SALARY_DAY_DIVISOR: i64 = 30;

/// Rounds a monetary value to 2 decimal places, half-up.
///
/// Applied to every monetary field (`late_deduction_amount`,
/// `overtime_bonus_amount`, `net_salary`); intermediate hour values stay
/// unrounded.
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A computed payroll plus the calendar warning, if the employee's weekend
/// configuration was malformed and the default weekend was substituted.
#[derive(Debug, Clone)]
pub struct Recalculation {
    /// The computed payroll row.
    pub payroll: Payroll,
    /// Set when the calendar fell back to its default weekend.
    pub warning: Option<CalendarWarning>,
}

/// Computes one employee's payroll for one month. Pure: no storage access.
///
/// Records outside the month and negative derived durations are tolerated
/// defensively (filtered and floored respectively). `attended_days` counts
/// distinct dates with a record; `absent_days` is floored at zero, which also
/// absorbs historical records on dates that later became weekends or
/// holidays.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::compute_payroll;
/// use payroll_engine::models::{
///     AdjustmentRate, CompensationPolicy, Employee, Month,
/// };
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
/// use std::collections::HashSet;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     salary: Decimal::new(3000, 0),
///     working_hours_per_day: 8,
///     default_check_in_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     default_check_out_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// };
/// let policy = CompensationPolicy {
///     employee_id: "emp_001".to_string(),
///     deduction: AdjustmentRate::Hours { rate: Decimal::ONE },
///     overtime: AdjustmentRate::Hours { rate: Decimal::ONE },
///     weekend_days: vec!["Saturday".to_string(), "Sunday".to_string()],
/// };
///
/// let result = compute_payroll(
///     &employee,
///     &policy,
///     &[],
///     &HashSet::new(),
///     Month::new(2022, 5).unwrap(),
/// );
/// assert_eq!(result.payroll.business_days_in_month, 22);
/// assert_eq!(result.payroll.absent_days, 22);
/// assert_eq!(result.payroll.net_salary, Decimal::ZERO);
/// ```
pub fn compute_payroll(
    employee: &Employee,
    policy: &CompensationPolicy,
    records: &[AttendanceRecord],
    holidays: &HashSet<NaiveDate>,
    month: Month,
) -> Recalculation {
    let (weekend_days, warning) = resolve_weekend_days(&policy.weekend_days);
    let business_days = business_days_in_month(month, &weekend_days, holidays);

    let in_month: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| month.contains(r.date))
        .collect();

    let attended_dates: BTreeSet<NaiveDate> = in_month.iter().map(|r| r.date).collect();
    let attended_days = attended_dates.len() as u32;
    let absent_days = business_days.saturating_sub(attended_days);

    let total_late_hours: Decimal = in_month
        .iter()
        .map(|r| r.late_hours.max(Decimal::ZERO))
        .sum();
    let total_overtime_hours: Decimal = in_month
        .iter()
        .map(|r| r.overtime_hours.max(Decimal::ZERO))
        .sum();

    let daily_rate = employee.salary / Decimal::new(SALARY_DAY_DIVISOR, 0);
    let hourly_rate = if employee.working_hours_per_day > 0 {
        daily_rate / Decimal::from(employee.working_hours_per_day)
    } else {
        Decimal::ZERO
    };

    let late_deduction_amount =
        round_money(policy.deduction.amount(total_late_hours, hourly_rate));
    let overtime_bonus_amount =
        round_money(policy.overtime.amount(total_overtime_hours, hourly_rate));

    let earned = Decimal::from(attended_days) * daily_rate - late_deduction_amount
        + overtime_bonus_amount;
    let net_salary = round_money(earned.max(Decimal::ZERO));

    Recalculation {
        payroll: Payroll {
            employee_id: employee.id.clone(),
            month,
            business_days_in_month: business_days,
            attended_days,
            absent_days,
            total_late_hours,
            total_overtime_hours,
            late_deduction_amount,
            overtime_bonus_amount,
            net_salary,
        },
        warning,
    }
}

/// Recalculates and upserts the payroll row for one `(employee, month)` pair.
///
/// Loads current employee, policy, attendance, and holiday state, computes
/// the payroll, and writes it: an existing row is updated in place, otherwise
/// a row is inserted. A uniqueness conflict on insert surfaces as the
/// recoverable [`EngineError::PayrollExists`] — a concurrent recalculation
/// already has, or will have, the answer. A missing policy surfaces as
/// [`EngineError::PolicyNotFound`] with nothing written.
pub fn recalculate<S: Store>(
    store: &S,
    employee_id: &str,
    month: Month,
) -> EngineResult<Payroll> {
    let employee = store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;
    let policy = store
        .policy_for(employee_id)?
        .ok_or_else(|| EngineError::PolicyNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let holidays: HashSet<NaiveDate> = store
        .holidays_between(month.first_day(), month.last_day())?
        .into_iter()
        .map(|h| h.date)
        .collect();
    let records = store.attendance_for_month(employee_id, month)?;

    let Recalculation { payroll, .. } =
        compute_payroll(&employee, &policy, &records, &holidays, month);

    if store.payroll(employee_id, month)?.is_some() {
        store.update_payroll(payroll.clone())?;
    } else {
        store.insert_payroll(payroll.clone())?;
    }

    Ok(payroll)
}
