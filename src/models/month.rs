//! Calendar month value type.
//!
//! Payroll rows are keyed by `(employee_id, month)`. The [`Month`] type keeps
//! that key an explicit `(year, month)` pair — never a full date — and
//! serializes as a `"YYYY-MM"` string.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar year-month pair.
///
/// Day counting always goes through true calendar arithmetic, so 28, 29, 30
/// and 31-day months each report their real length.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Month;
///
/// let month: Month = "2024-02".parse().unwrap();
/// assert_eq!(month.day_count(), 29); // leap year
/// assert_eq!(month.to_string(), "2024-02");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, returning `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("constructor validated year-month")
    }

    /// The last day of the month, via true calendar arithmetic.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("valid successor month")
            .pred_opt()
            .expect("month start has a predecessor")
    }

    /// The number of days in the month.
    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Iterates every calendar date in the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    /// Returns true if the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid month key '{}': expected YYYY-MM", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in month key '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in month key '{}'", s))?;
        Month::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_month_zero_and_thirteen() {
        assert!(Month::new(2025, 0).is_none());
        assert!(Month::new(2025, 13).is_none());
        assert!(Month::new(2025, 12).is_some());
    }

    #[test]
    fn test_day_count_handles_every_month_length() {
        assert_eq!(Month::new(2025, 1).unwrap().day_count(), 31);
        assert_eq!(Month::new(2025, 4).unwrap().day_count(), 30);
        assert_eq!(Month::new(2025, 2).unwrap().day_count(), 28);
        assert_eq!(Month::new(2024, 2).unwrap().day_count(), 29); // leap year
        assert_eq!(Month::new(2000, 2).unwrap().day_count(), 29); // century leap
        assert_eq!(Month::new(1900, 2).unwrap().day_count(), 28); // century non-leap
    }

    #[test]
    fn test_days_iterates_full_month_in_order() {
        let month = Month::new(2024, 2).unwrap();
        let days: Vec<NaiveDate> = month.days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(days[28], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_december_last_day_wraps_year() {
        let month = Month::new(2025, 12).unwrap();
        assert_eq!(
            month.last_day(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
        assert_eq!(Month::from_date(date), Month::new(2025, 5).unwrap());
    }

    #[test]
    fn test_contains() {
        let month = Month::new(2025, 5).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(Month::new(2025, 5).unwrap().to_string(), "2025-05");
        assert_eq!(Month::new(2025, 11).unwrap().to_string(), "2025-11");
    }

    #[test]
    fn test_parse_round_trip() {
        let month: Month = "2025-05".parse().unwrap();
        assert_eq!(month, Month::new(2025, 5).unwrap());
        assert_eq!(month.to_string().parse::<Month>().unwrap(), month);
    }

    #[test]
    fn test_parse_rejects_full_dates_and_garbage() {
        assert!("2025-05-01".parse::<Month>().is_err());
        assert!("2025".parse::<Month>().is_err());
        assert!("May 2025".parse::<Month>().is_err());
        assert!("2025-00".parse::<Month>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let month = Month::new(2025, 5).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-05\"");

        let deserialized: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, month);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = Month::new(2024, 12).unwrap();
        let b = Month::new(2025, 1).unwrap();
        let c = Month::new(2025, 2).unwrap();
        assert!(a < b && b < c);
    }
}
