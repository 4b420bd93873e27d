//! Recalculation trigger coordinator.
//!
//! Upstream mutations (attendance writes, holiday register changes, policy
//! changes, employee compensation edits) each affect a known set of
//! `(employee, month)` payroll pairs. This module maps a [`ChangeEvent`] to
//! that set and invokes the recalculation engine once per pair. The fan-out
//! is explicit and returns its per-pair results to the caller — nothing fires
//! silently as a persistence side effect — and a failure for one pair never
//! aborts the others.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::engine::recalculate;
use crate::error::EngineResult;
use crate::models::{Month, Payroll};
use crate::store::Store;

/// An upstream mutation that requires payroll recalculation.
///
/// The coordinator never reads the clock: events that depend on "now"
/// (a freshly created employee) carry the current month from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// An attendance record was created, updated, or deleted.
    AttendanceChanged {
        /// The employee whose record changed.
        employee_id: String,
        /// The date of the changed record.
        date: NaiveDate,
    },
    /// A holiday was registered or removed on the given date.
    HolidayChanged {
        /// The date of the holiday.
        date: NaiveDate,
    },
    /// A holiday's date was edited; both old and new months are affected.
    HolidayMoved {
        /// The date before the edit.
        old_date: NaiveDate,
        /// The date after the edit.
        new_date: NaiveDate,
    },
    /// An employee's compensation policy was created, updated, or deleted.
    PolicyChanged {
        /// The employee whose policy changed.
        employee_id: String,
    },
    /// An employee's salary or working-hours fields changed. Other employee
    /// edits are not recalculation triggers.
    EmployeeRatesChanged {
        /// The employee whose rates changed.
        employee_id: String,
    },
    /// A new employee was created; only the current month is affected.
    EmployeeCreated {
        /// The new employee.
        employee_id: String,
        /// The current month, supplied by the caller.
        month: Month,
    },
}

/// The result of one recalculation within a fan-out.
#[derive(Debug)]
pub struct PairOutcome {
    /// The employee of the recalculated pair.
    pub employee_id: String,
    /// The month of the recalculated pair.
    pub month: Month,
    /// The recalculation result; failures stay isolated to their pair.
    pub result: EngineResult<Payroll>,
}

/// The per-pair results of one fan-out.
#[derive(Debug, Default)]
pub struct FanOutReport {
    /// One outcome per affected `(employee, month)` pair.
    pub outcomes: Vec<PairOutcome>,
}

impl FanOutReport {
    /// The number of pairs that recalculated successfully.
    pub fn recalculated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// The outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// True when every pair recalculated successfully.
    pub fn is_fully_successful(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Derives the set of `(employee, month)` pairs affected by an event.
///
/// Attendance changes affect only that record's pair. Holiday changes affect
/// every employee for the holiday's month (both months for a date move across
/// a month boundary). Policy and compensation-rate changes affect the
/// employee's every month with at least one attendance record. A new employee
/// affects only the supplied current month.
pub fn affected_pairs<S: Store>(
    store: &S,
    event: &ChangeEvent,
) -> EngineResult<Vec<(String, Month)>> {
    let mut pairs: BTreeSet<(String, Month)> = BTreeSet::new();

    match event {
        ChangeEvent::AttendanceChanged { employee_id, date } => {
            pairs.insert((employee_id.clone(), Month::from_date(*date)));
        }
        ChangeEvent::HolidayChanged { date } => {
            let month = Month::from_date(*date);
            for employee_id in store.employee_ids()? {
                pairs.insert((employee_id, month));
            }
        }
        ChangeEvent::HolidayMoved { old_date, new_date } => {
            let months: BTreeSet<Month> =
                [Month::from_date(*old_date), Month::from_date(*new_date)]
                    .into_iter()
                    .collect();
            for employee_id in store.employee_ids()? {
                for month in &months {
                    pairs.insert((employee_id.clone(), *month));
                }
            }
        }
        ChangeEvent::PolicyChanged { employee_id }
        | ChangeEvent::EmployeeRatesChanged { employee_id } => {
            for month in store.months_with_attendance(employee_id)? {
                pairs.insert((employee_id.clone(), month));
            }
        }
        ChangeEvent::EmployeeCreated { employee_id, month } => {
            pairs.insert((employee_id.clone(), *month));
        }
    }

    Ok(pairs.into_iter().collect())
}

/// Recalculates every pair affected by the event.
///
/// Each pair is recalculated independently; a failure — including a fatal
/// storage failure — is recorded in that pair's outcome and logged, and the
/// fan-out continues with the remaining pairs. Deriving the pair set itself
/// can fail, and that error does propagate: with no pair set there is nothing
/// to isolate.
pub fn dispatch<S: Store>(store: &S, event: &ChangeEvent) -> EngineResult<FanOutReport> {
    let pairs = affected_pairs(store, event)?;
    let mut report = FanOutReport::default();

    for (employee_id, month) in pairs {
        let result = recalculate(store, &employee_id, month);
        if let Err(error) = &result {
            warn!(employee_id = %employee_id, month = %month, error = %error,
                  "recalculation failed for pair");
        }
        report.outcomes.push(PairOutcome {
            employee_id,
            month,
            result,
        });
    }

    Ok(report)
}
