//! In-memory store implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, CompensationPolicy, Employee, Holiday, Month, Payroll,
};

use super::{AttendanceStore, EmployeeStore, HolidayStore, PayrollStore, PolicyStore};

/// An in-memory implementation of every storage contract.
///
/// Each table sits behind its own mutex, so every store operation is atomic
/// and concurrent recalculations of the same `(employee, month)` pair
/// serialize on the payroll table; the losing insert surfaces as
/// [`EngineError::PayrollExists`].
///
/// # Example
///
/// ```
/// use payroll_engine::store::{EmployeeStore, MemoryStore};
/// use payroll_engine::models::Employee;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// store.put_employee(Employee {
///     id: "emp_001".to_string(),
///     salary: Decimal::new(3000, 0),
///     working_hours_per_day: 8,
///     default_check_in_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     default_check_out_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// }).unwrap();
/// assert!(store.employee("emp_001").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: Mutex<BTreeMap<String, Employee>>,
    policies: Mutex<BTreeMap<String, CompensationPolicy>>,
    holidays: Mutex<BTreeMap<NaiveDate, Holiday>>,
    attendance: Mutex<BTreeMap<(String, NaiveDate), AttendanceRecord>>,
    payroll: Mutex<BTreeMap<(String, Month), Payroll>>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, operation: &str) -> EngineResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| EngineError::Storage {
        operation: operation.to_string(),
        message: "store lock poisoned by a panicking writer".to_string(),
    })
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee row.
    pub fn put_employee(&self, employee: Employee) -> EngineResult<()> {
        lock(&self.employees, "employee upsert")?.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Inserts or replaces a compensation policy.
    pub fn put_policy(&self, policy: CompensationPolicy) -> EngineResult<()> {
        lock(&self.policies, "policy upsert")?.insert(policy.employee_id.clone(), policy);
        Ok(())
    }

    /// Removes the policy for an employee. Returns whether one existed.
    pub fn remove_policy(&self, employee_id: &str) -> EngineResult<bool> {
        Ok(lock(&self.policies, "policy delete")?
            .remove(employee_id)
            .is_some())
    }
}

impl EmployeeStore for MemoryStore {
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(lock(&self.employees, "employee lookup")?
            .get(employee_id)
            .cloned())
    }

    fn employee_ids(&self) -> EngineResult<Vec<String>> {
        Ok(lock(&self.employees, "employee listing")?
            .keys()
            .cloned()
            .collect())
    }
}

impl PolicyStore for MemoryStore {
    fn policy_for(&self, employee_id: &str) -> EngineResult<Option<CompensationPolicy>> {
        Ok(lock(&self.policies, "policy lookup")?
            .get(employee_id)
            .cloned())
    }
}

impl HolidayStore for MemoryStore {
    fn holidays_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Holiday>> {
        Ok(lock(&self.holidays, "holiday range lookup")?
            .range(from..=to)
            .map(|(_, h)| h.clone())
            .collect())
    }

    fn put_holiday(&self, holiday: Holiday) -> EngineResult<()> {
        lock(&self.holidays, "holiday upsert")?.insert(holiday.date, holiday);
        Ok(())
    }

    fn remove_holiday(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(lock(&self.holidays, "holiday delete")?
            .remove(&date)
            .is_some())
    }
}

impl AttendanceStore for MemoryStore {
    fn attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        Ok(lock(&self.attendance, "attendance lookup")?
            .get(&(employee_id.to_string(), date))
            .cloned())
    }

    fn put_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        lock(&self.attendance, "attendance upsert")?
            .insert((record.employee_id.clone(), record.date), record);
        Ok(())
    }

    fn delete_attendance(&self, employee_id: &str, date: NaiveDate) -> EngineResult<bool> {
        Ok(lock(&self.attendance, "attendance delete")?
            .remove(&(employee_id.to_string(), date))
            .is_some())
    }

    fn attendance_for_month(
        &self,
        employee_id: &str,
        month: Month,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let from = (employee_id.to_string(), month.first_day());
        let to = (employee_id.to_string(), month.last_day());
        Ok(lock(&self.attendance, "attendance month lookup")?
            .range(from..=to)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn months_with_attendance(&self, employee_id: &str) -> EngineResult<Vec<Month>> {
        let months: BTreeSet<Month> = lock(&self.attendance, "attendance month scan")?
            .iter()
            .filter(|((id, _), _)| id == employee_id)
            .map(|((_, date), _)| Month::from_date(*date))
            .collect();
        Ok(months.into_iter().collect())
    }
}

impl PayrollStore for MemoryStore {
    fn payroll(&self, employee_id: &str, month: Month) -> EngineResult<Option<Payroll>> {
        Ok(lock(&self.payroll, "payroll lookup")?
            .get(&(employee_id.to_string(), month))
            .cloned())
    }

    fn insert_payroll(&self, payroll: Payroll) -> EngineResult<()> {
        let mut table = lock(&self.payroll, "payroll insert")?;
        let key = (payroll.employee_id.clone(), payroll.month);
        if table.contains_key(&key) {
            return Err(EngineError::PayrollExists {
                employee_id: payroll.employee_id,
                month: payroll.month,
            });
        }
        table.insert(key, payroll);
        Ok(())
    }

    fn update_payroll(&self, payroll: Payroll) -> EngineResult<()> {
        let mut table = lock(&self.payroll, "payroll update")?;
        let key = (payroll.employee_id.clone(), payroll.month);
        if !table.contains_key(&key) {
            return Err(EngineError::Storage {
                operation: format!(
                    "payroll update for employee '{}' in {}",
                    payroll.employee_id, payroll.month
                ),
                message: "row to update does not exist".to_string(),
            });
        }
        table.insert(key, payroll);
        Ok(())
    }
}
