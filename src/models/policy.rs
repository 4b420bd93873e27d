//! Compensation policy model.
//!
//! This module defines the per-employee compensation configuration: how late
//! arrivals are deducted, how overtime is rewarded, and which weekdays count
//! as that employee's weekend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A deduction or overtime rate, tagged by its unit.
///
/// A `Currency` rate is applied per hour directly in currency units; an
/// `Hours` rate converts through the employee's hourly rate. Each variant has
/// exactly one evaluation path, so unit handling never leaks into the
/// calculation as string comparisons.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AdjustmentRate;
/// use rust_decimal::Decimal;
///
/// let per_hour = AdjustmentRate::Currency { rate: Decimal::new(20, 0) };
/// let hourly_rate = Decimal::new(125, 1); // 12.5
/// // 2 late hours at 20 currency units each
/// assert_eq!(
///     per_hour.amount(Decimal::new(2, 0), hourly_rate),
///     Decimal::new(40, 0)
/// );
///
/// let scaled = AdjustmentRate::Hours { rate: Decimal::new(2, 0) };
/// // 2 late hours, doubled, priced at the hourly rate
/// assert_eq!(
///     scaled.amount(Decimal::new(2, 0), hourly_rate),
///     Decimal::new(50, 0)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum AdjustmentRate {
    /// Currency units per hour of lateness/overtime.
    Currency {
        /// The rate in currency units, non-negative.
        rate: Decimal,
    },
    /// A multiplier on hours, priced at the employee's hourly rate.
    Hours {
        /// The multiplier, non-negative.
        rate: Decimal,
    },
}

impl AdjustmentRate {
    /// Evaluates the adjustment amount for the given hours.
    ///
    /// The result is unrounded; callers round monetary fields once, at the
    /// end of the calculation.
    pub fn amount(&self, hours: Decimal, hourly_rate: Decimal) -> Decimal {
        match self {
            AdjustmentRate::Currency { rate } => hours * *rate,
            AdjustmentRate::Hours { rate } => hours * *rate * hourly_rate,
        }
    }

    /// The raw configured rate, regardless of unit.
    pub fn rate(&self) -> Decimal {
        match self {
            AdjustmentRate::Currency { rate } | AdjustmentRate::Hours { rate } => *rate,
        }
    }
}

/// Per-employee compensation configuration, one-to-one with an employee.
///
/// Absence of this entity makes recalculation for the employee fail with a
/// reported, non-fatal error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationPolicy {
    /// The employee this policy configures.
    pub employee_id: String,
    /// How late hours are deducted from pay.
    pub deduction: AdjustmentRate,
    /// How overtime hours are added to pay.
    pub overtime: AdjustmentRate,
    /// Raw weekday names making up this employee's weekend. Intended size is
    /// two, but any size is tolerated; malformed entries make the calendar
    /// fall back to its default weekend.
    pub weekend_days: Vec<String>,
}
