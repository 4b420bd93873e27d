//! Holiday model.
//!
//! Holidays are global, not per-employee: a single calendar date plus a name.
//! The holiday register holds at most one holiday per date; the surrounding
//! write path enforces that, not the calculation core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered public holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     name: "Labour Day".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Labour Day").
    pub name: String,
}
