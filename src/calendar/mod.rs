//! Business calendar logic.
//!
//! This module decides which calendar dates are business days for an
//! employee, given the employee's weekend-day configuration and the global
//! holiday register, and counts business days per month with true calendar
//! arithmetic (28/29/30/31-day months each handled by their real length).

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Month;

/// The default two-day weekend substituted when an employee's stored
/// weekend configuration is malformed.
pub const DEFAULT_WEEKEND_DAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// A structured warning surfaced when the calendar falls back to
/// [`DEFAULT_WEEKEND_DAYS`].
///
/// The fallback keeps recalculation running on bad configuration, but it is
/// never a silent acceptance: the warning travels with the calculation result
/// and is logged at the resolution site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// Resolves raw weekday-name strings into a weekday set.
///
/// Any set size from 0 to 7 of valid names is accepted as-is (the intended
/// size is two, but other sizes are tolerated). If any entry fails to parse
/// as a weekday name, the whole value is treated as malformed: the default
/// two-day weekend is substituted and a [`CalendarWarning`] is returned
/// alongside it.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::resolve_weekend_days;
/// use chrono::Weekday;
///
/// let (days, warning) =
///     resolve_weekend_days(&["Friday".to_string(), "Saturday".to_string()]);
/// assert!(days.contains(&Weekday::Fri) && days.contains(&Weekday::Sat));
/// assert!(warning.is_none());
///
/// let (days, warning) = resolve_weekend_days(&["Caturday".to_string()]);
/// assert!(days.contains(&Weekday::Sat) && days.contains(&Weekday::Sun));
/// assert!(warning.is_some());
/// ```
pub fn resolve_weekend_days(raw: &[String]) -> (HashSet<Weekday>, Option<CalendarWarning>) {
    let mut resolved = HashSet::new();
    for name in raw {
        match name.parse::<Weekday>() {
            Ok(day) => {
                resolved.insert(day);
            }
            Err(_) => {
                let warning = CalendarWarning {
                    code: "weekend_config_fallback".to_string(),
                    message: format!(
                        "weekend configuration entry '{}' is not a weekday name; \
                         falling back to the default Saturday/Sunday weekend",
                        name
                    ),
                };
                warn!(entry = %name, "malformed weekend configuration, using default weekend");
                return (DEFAULT_WEEKEND_DAYS.into_iter().collect(), Some(warning));
            }
        }
    }
    (resolved, None)
}

/// Returns true if the date is neither a weekend day nor a holiday.
pub fn is_business_day(
    date: NaiveDate,
    weekend_days: &HashSet<Weekday>,
    holidays: &HashSet<NaiveDate>,
) -> bool {
    !weekend_days.contains(&date.weekday()) && !holidays.contains(&date)
}

/// Counts the business days in a month.
///
/// Enumerates every calendar date in the month; a date counts unless its
/// weekday is in `weekend_days` or its date is in `holidays`.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::{business_days_in_month, DEFAULT_WEEKEND_DAYS};
/// use payroll_engine::models::Month;
/// use std::collections::HashSet;
///
/// let weekend = DEFAULT_WEEKEND_DAYS.into_iter().collect();
/// let month = Month::new(2022, 5).unwrap();
/// assert_eq!(business_days_in_month(month, &weekend, &HashSet::new()), 22);
/// ```
pub fn business_days_in_month(
    month: Month,
    weekend_days: &HashSet<Weekday>,
    holidays: &HashSet<NaiveDate>,
) -> u32 {
    month
        .days()
        .filter(|d| is_business_day(*d, weekend_days, holidays))
        .count() as u32
}
