//! Storage contracts for the engine's collaborators.
//!
//! The recalculation core does not own persistence. Collaborators supply
//! entity data through the traits in this module: employee lookup, policy
//! lookup, the holiday register, attendance CRUD keyed by `(employee_id,
//! date)`, and the payroll table keyed by `(employee_id, month)` with a
//! uniqueness constraint backing the upsert rule.
//!
//! [`MemoryStore`] is the in-process implementation used by the HTTP surface
//! and the test suite.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, CompensationPolicy, Employee, Holiday, Month, Payroll,
};

/// Employee lookup.
pub trait EmployeeStore {
    /// Fetches one employee by id.
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Lists every known employee id, in stable order.
    fn employee_ids(&self) -> EngineResult<Vec<String>>;
}

/// Compensation policy lookup, one-to-one with employees and nullable.
pub trait PolicyStore {
    /// Fetches the policy for an employee, if one is configured.
    fn policy_for(&self, employee_id: &str) -> EngineResult<Option<CompensationPolicy>>;
}

/// The global holiday register.
pub trait HolidayStore {
    /// Fetches holidays with `from <= date <= to`, distinct by date.
    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Holiday>>;

    /// Inserts or replaces the holiday registered on its date. Uniqueness
    /// invariants (one per date, one name per year) are enforced by the
    /// write path, not here.
    fn put_holiday(&self, holiday: Holiday) -> EngineResult<()>;

    /// Removes the holiday on the given date. Returns whether one existed.
    fn remove_holiday(&self, date: NaiveDate) -> EngineResult<bool>;
}

/// Attendance records keyed by `(employee_id, date)`.
pub trait AttendanceStore {
    /// Fetches the record for one employee and date.
    fn attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>>;

    /// Inserts or replaces the record under its `(employee_id, date)` key.
    fn put_attendance(&self, record: AttendanceRecord) -> EngineResult<()>;

    /// Deletes the record for one employee and date. Returns whether one
    /// existed.
    fn delete_attendance(&self, employee_id: &str, date: NaiveDate) -> EngineResult<bool>;

    /// Fetches every record for the employee within the month, ordered by
    /// date.
    fn attendance_for_month(
        &self,
        employee_id: &str,
        month: Month,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// The distinct months in which the employee has at least one record,
    /// in chronological order.
    fn months_with_attendance(&self, employee_id: &str) -> EngineResult<Vec<Month>>;
}

/// The payroll table keyed by `(employee_id, month)`.
pub trait PayrollStore {
    /// Fetches the payroll row for one employee and month.
    fn payroll(&self, employee_id: &str, month: Month) -> EngineResult<Option<Payroll>>;

    /// Inserts a new payroll row. Fails with
    /// [`EngineError::PayrollExists`](crate::error::EngineError::PayrollExists)
    /// when a row for the pair already exists — the recoverable signal that a
    /// concurrent recalculation got there first.
    fn insert_payroll(&self, payroll: Payroll) -> EngineResult<()>;

    /// Rewrites every field of an existing payroll row in place.
    fn update_payroll(&self, payroll: Payroll) -> EngineResult<()>;
}

/// The combined contract the engine, ledger, and coordinator operate over.
pub trait Store:
    EmployeeStore + PolicyStore + HolidayStore + AttendanceStore + PayrollStore
{
}

impl<T> Store for T where
    T: EmployeeStore + PolicyStore + HolidayStore + AttendanceStore + PayrollStore
{
}
