//! Attendance ledger operations.
//!
//! This module owns the rules for writing attendance state: check-in,
//! check-out, administrative edits, deletion, and the absentee sweep. Every
//! operation validates before mutating, so a rejected operation leaves no
//! trace. The derived late/overtime durations are recomputed here, with the
//! same algorithm for every write path.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::warn;

use crate::calendar::{is_business_day, resolve_weekend_days};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, Employee};
use crate::store::Store;

/// Hours arrived after the default check-in time, floored at zero.
///
/// An early arrival never produces a negative adjustment.
///
/// # Example
///
/// ```
/// use payroll_engine::ledger::late_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let expected = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let actual = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
/// assert_eq!(late_hours(expected, actual), Decimal::new(5, 1)); // 0.5
///
/// let early = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
/// assert_eq!(late_hours(expected, early), Decimal::ZERO);
/// ```
pub fn late_hours(default_check_in: NaiveTime, actual_check_in: NaiveTime) -> Decimal {
    let minutes = (actual_check_in - default_check_in).num_minutes().max(0);
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Hours worked past the default check-out time, floored at zero.
///
/// An early departure never produces a negative adjustment.
pub fn overtime_hours(default_check_out: NaiveTime, actual_check_out: NaiveTime) -> Decimal {
    if actual_check_out <= default_check_out {
        return Decimal::ZERO;
    }
    let minutes = (actual_check_out - default_check_out).num_minutes();
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

fn load_employee<S: Store>(store: &S, employee_id: &str) -> EngineResult<Employee> {
    store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })
}

/// Validates that `date` is a working day for the employee, rejecting
/// weekends, holidays, and missing policies with a `PolicyViolation`.
fn require_working_day<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<()> {
    let Some(policy) = store.policy_for(employee_id)? else {
        return Err(EngineError::PolicyViolation {
            employee_id: employee_id.to_string(),
            date,
            message: "no compensation policy configured".to_string(),
        });
    };

    let (weekend_days, _warning) = resolve_weekend_days(&policy.weekend_days);
    let holidays: HashSet<NaiveDate> = store
        .holidays_between(date, date)?
        .into_iter()
        .map(|h| h.date)
        .collect();

    if !is_business_day(date, &weekend_days, &holidays) {
        return Err(EngineError::PolicyViolation {
            employee_id: employee_id.to_string(),
            date,
            message: "date falls on a weekend or holiday".to_string(),
        });
    }
    Ok(())
}

/// Records a check-in for the employee on `date`.
///
/// Rejected with a `PolicyViolation` when the date is a weekend or holiday
/// for the employee, or when no compensation policy is configured. A repeat
/// check-in on the same date is not an error: it overwrites the check-in time
/// and recomputes the derived durations.
pub fn check_in<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> EngineResult<AttendanceRecord> {
    let employee = load_employee(store, employee_id)?;
    require_working_day(store, employee_id, date)?;

    let mut record = store
        .attendance(employee_id, date)?
        .unwrap_or_else(|| AttendanceRecord::absent(employee_id, date));

    record.check_in_time = Some(time);
    record.status = AttendanceStatus::Present;
    record.late_hours = late_hours(employee.default_check_in_time, time);
    if let Some(out) = record.check_out_time {
        record.overtime_hours = overtime_hours(employee.default_check_out_time, out);
    }

    store.put_attendance(record.clone())?;
    Ok(record)
}

/// Records a check-out for the employee on `date`.
///
/// Requires a prior attendance record for the date (`AttendanceNotFound`
/// otherwise) and rejects a second check-out for the same date with a
/// `PolicyViolation` — check-out is one-shot per day.
pub fn check_out<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> EngineResult<AttendanceRecord> {
    let employee = load_employee(store, employee_id)?;

    let mut record =
        store
            .attendance(employee_id, date)?
            .ok_or_else(|| EngineError::AttendanceNotFound {
                employee_id: employee_id.to_string(),
                date,
            })?;

    if record.check_out_time.is_some() {
        return Err(EngineError::PolicyViolation {
            employee_id: employee_id.to_string(),
            date,
            message: "check-out already recorded for this date".to_string(),
        });
    }

    record.check_out_time = Some(time);
    record.overtime_hours = overtime_hours(employee.default_check_out_time, time);
    if let Some(actual_in) = record.check_in_time {
        record.late_hours = late_hours(employee.default_check_in_time, actual_in);
    }

    store.put_attendance(record.clone())?;
    Ok(record)
}

/// Validates an administrative time pair: check-out strictly after check-in.
fn require_ordered_times(
    employee_id: &str,
    date: NaiveDate,
    check_in_time: NaiveTime,
    check_out_time: NaiveTime,
) -> EngineResult<()> {
    if check_out_time <= check_in_time {
        return Err(EngineError::PolicyViolation {
            employee_id: employee_id.to_string(),
            date,
            message: "check-out time must be strictly after check-in time".to_string(),
        });
    }
    Ok(())
}

/// Administrative create: a full record with both times.
///
/// Rejects a duplicate `(employee, date)` pair. Business-day validation is
/// deliberately not applied here: administrators may backfill historical
/// records that predate a weekend or holiday registration.
pub fn create_record<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
    check_in_time: NaiveTime,
    check_out_time: NaiveTime,
    status: AttendanceStatus,
) -> EngineResult<AttendanceRecord> {
    let employee = load_employee(store, employee_id)?;
    require_ordered_times(employee_id, date, check_in_time, check_out_time)?;

    if store.attendance(employee_id, date)?.is_some() {
        return Err(EngineError::PolicyViolation {
            employee_id: employee_id.to_string(),
            date,
            message: "an attendance record already exists for this date".to_string(),
        });
    }

    let record = build_record(&employee, date, check_in_time, check_out_time, status);
    store.put_attendance(record.clone())?;
    Ok(record)
}

/// Administrative update: rewrites the record's times and status.
///
/// Fails with `AttendanceNotFound` when no record exists for the date.
pub fn update_record<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
    check_in_time: NaiveTime,
    check_out_time: NaiveTime,
    status: AttendanceStatus,
) -> EngineResult<AttendanceRecord> {
    let employee = load_employee(store, employee_id)?;
    require_ordered_times(employee_id, date, check_in_time, check_out_time)?;

    if store.attendance(employee_id, date)?.is_none() {
        return Err(EngineError::AttendanceNotFound {
            employee_id: employee_id.to_string(),
            date,
        });
    }

    let record = build_record(&employee, date, check_in_time, check_out_time, status);
    store.put_attendance(record.clone())?;
    Ok(record)
}

fn build_record(
    employee: &Employee,
    date: NaiveDate,
    check_in_time: NaiveTime,
    check_out_time: NaiveTime,
    status: AttendanceStatus,
) -> AttendanceRecord {
    AttendanceRecord {
        employee_id: employee.id.clone(),
        date,
        check_in_time: Some(check_in_time),
        check_out_time: Some(check_out_time),
        late_hours: late_hours(employee.default_check_in_time, check_in_time),
        overtime_hours: overtime_hours(employee.default_check_out_time, check_out_time),
        status,
    }
}

/// Deletes the record for one employee and date.
///
/// Fails with `AttendanceNotFound` when no record exists.
pub fn delete_record<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<()> {
    if !store.delete_attendance(employee_id, date)? {
        return Err(EngineError::AttendanceNotFound {
            employee_id: employee_id.to_string(),
            date,
        });
    }
    Ok(())
}

/// The result of an absentee sweep.
#[derive(Debug)]
pub struct SweepReport {
    /// The date the sweep covered.
    pub date: NaiveDate,
    /// Employees for whom an absent record was created.
    pub marked: Vec<String>,
    /// Per-employee failures; one bad employee never aborts the sweep.
    pub failures: Vec<(String, EngineError)>,
}

/// Marks absentees for the given date.
///
/// For every employee: if the date is a business day under that employee's
/// weekend configuration and no attendance record exists yet, an `Absent`
/// record with zero durations is created. Employees without a compensation
/// policy are reported in the failure list and skipped — mirroring the
/// fan-out isolation rule. Scheduling this once per business day is the
/// caller's concern.
pub fn mark_absentees<S: Store>(store: &S, date: NaiveDate) -> EngineResult<SweepReport> {
    let mut report = SweepReport {
        date,
        marked: Vec::new(),
        failures: Vec::new(),
    };

    let holidays: HashSet<NaiveDate> = store
        .holidays_between(date, date)?
        .into_iter()
        .map(|h| h.date)
        .collect();

    for employee_id in store.employee_ids()? {
        match sweep_one(store, &employee_id, date, &holidays) {
            Ok(true) => report.marked.push(employee_id),
            Ok(false) => {}
            Err(error) => {
                warn!(employee_id = %employee_id, date = %date, error = %error,
                      "absentee sweep skipped employee");
                report.failures.push((employee_id, error));
            }
        }
    }

    Ok(report)
}

fn sweep_one<S: Store>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> EngineResult<bool> {
    let policy =
        store
            .policy_for(employee_id)?
            .ok_or_else(|| EngineError::PolicyNotFound {
                employee_id: employee_id.to_string(),
            })?;

    let (weekend_days, _warning) = resolve_weekend_days(&policy.weekend_days);
    if !is_business_day(date, &weekend_days, holidays) {
        return Ok(false);
    }
    if store.attendance(employee_id, date)?.is_some() {
        return Ok(false);
    }

    store.put_attendance(AttendanceRecord::absent(employee_id, date))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjustmentRate, CompensationPolicy};
    use crate::store::{AttendanceStore, HolidayStore, MemoryStore};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put_employee(Employee {
                id: "emp_001".to_string(),
                salary: dec("3000"),
                working_hours_per_day: 8,
                default_check_in_time: time(9, 0),
                default_check_out_time: time(17, 0),
            })
            .unwrap();
        store
            .put_policy(CompensationPolicy {
                employee_id: "emp_001".to_string(),
                deduction: AdjustmentRate::Hours { rate: dec("1") },
                overtime: AdjustmentRate::Hours { rate: dec("1") },
                weekend_days: vec!["Saturday".to_string(), "Sunday".to_string()],
            })
            .unwrap();
        store
    }

    // =========================================================================
    // Derived-field algorithm
    // =========================================================================

    #[test]
    fn test_late_hours_half_hour() {
        assert_eq!(late_hours(time(9, 0), time(9, 30)), dec("0.5"));
    }

    #[test]
    fn test_late_hours_floors_early_arrival_at_zero() {
        assert_eq!(late_hours(time(9, 0), time(8, 15)), Decimal::ZERO);
    }

    #[test]
    fn test_late_hours_exact_arrival_is_zero() {
        assert_eq!(late_hours(time(9, 0), time(9, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_overtime_hours_past_default() {
        assert_eq!(overtime_hours(time(17, 0), time(19, 15)), dec("2.25"));
    }

    #[test]
    fn test_overtime_hours_floors_early_departure_at_zero() {
        assert_eq!(overtime_hours(time(17, 0), time(16, 0)), Decimal::ZERO);
        assert_eq!(overtime_hours(time(17, 0), time(17, 0)), Decimal::ZERO);
    }

    // =========================================================================
    // Check-in
    // =========================================================================

    #[test]
    fn test_check_in_creates_present_record_with_late_hours() {
        let store = seeded_store();
        // 2025-05-12 is a Monday
        let record = check_in(&store, "emp_001", date(2025, 5, 12), time(9, 30)).unwrap();

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in_time, Some(time(9, 30)));
        assert!(record.check_out_time.is_none());
        assert_eq!(record.late_hours, dec("0.5"));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert!(
            store
                .attendance("emp_001", date(2025, 5, 12))
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_repeat_check_in_overwrites_time_without_error() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 30)).unwrap();
        let record = check_in(&store, "emp_001", d, time(8, 55)).unwrap();

        assert_eq!(record.check_in_time, Some(time(8, 55)));
        assert_eq!(record.late_hours, Decimal::ZERO);
    }

    #[test]
    fn test_check_in_on_weekend_is_rejected_without_trace() {
        let store = seeded_store();
        // 2025-05-10 is a Saturday
        let err = check_in(&store, "emp_001", date(2025, 5, 10), time(9, 0)).unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { .. }));
        assert!(
            store
                .attendance("emp_001", date(2025, 5, 10))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_check_in_on_holiday_is_rejected() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        store
            .put_holiday(crate::models::Holiday {
                date: d,
                name: "Engine Day".to_string(),
            })
            .unwrap();

        let err = check_in(&store, "emp_001", d, time(9, 0)).unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { .. }));
    }

    #[test]
    fn test_check_in_without_policy_is_rejected() {
        let store = seeded_store();
        store.remove_policy("emp_001").unwrap();

        let err = check_in(&store, "emp_001", date(2025, 5, 12), time(9, 0)).unwrap_err();
        match err {
            EngineError::PolicyViolation { message, .. } => {
                assert!(message.contains("no compensation policy"));
            }
            other => panic!("Expected PolicyViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_in_respects_custom_weekend() {
        let store = seeded_store();
        store
            .put_policy(CompensationPolicy {
                employee_id: "emp_001".to_string(),
                deduction: AdjustmentRate::Hours { rate: dec("1") },
                overtime: AdjustmentRate::Hours { rate: dec("1") },
                weekend_days: vec!["Friday".to_string(), "Saturday".to_string()],
            })
            .unwrap();

        // Sunday 2025-05-11 is a working day under a Friday/Saturday weekend
        assert!(check_in(&store, "emp_001", date(2025, 5, 11), time(9, 0)).is_ok());
        // Friday 2025-05-09 is not
        assert!(check_in(&store, "emp_001", date(2025, 5, 9), time(9, 0)).is_err());
    }

    #[test]
    fn test_check_in_after_checkout_recomputes_both_durations() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 0)).unwrap();
        check_out(&store, "emp_001", d, time(18, 0)).unwrap();

        let record = check_in(&store, "emp_001", d, time(9, 15)).unwrap();
        assert_eq!(record.late_hours, dec("0.25"));
        assert_eq!(record.overtime_hours, dec("1"));
    }

    // =========================================================================
    // Check-out
    // =========================================================================

    #[test]
    fn test_check_out_requires_prior_record() {
        let store = seeded_store();
        let err = check_out(&store, "emp_001", date(2025, 5, 12), time(17, 0)).unwrap_err();
        assert!(matches!(err, EngineError::AttendanceNotFound { .. }));
    }

    #[test]
    fn test_check_out_computes_overtime_and_late() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 30)).unwrap();
        let record = check_out(&store, "emp_001", d, time(19, 0)).unwrap();

        assert_eq!(record.check_out_time, Some(time(19, 0)));
        assert_eq!(record.overtime_hours, dec("2"));
        assert_eq!(record.late_hours, dec("0.5"));
    }

    #[test]
    fn test_second_check_out_is_rejected_and_time_unchanged() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 0)).unwrap();
        check_out(&store, "emp_001", d, time(17, 0)).unwrap();

        let err = check_out(&store, "emp_001", d, time(20, 0)).unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { .. }));

        let record = store.attendance("emp_001", d).unwrap().unwrap();
        assert_eq!(record.check_out_time, Some(time(17, 0)));
    }

    #[test]
    fn test_check_out_against_sweep_record_is_permitted() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        store
            .put_attendance(AttendanceRecord::absent("emp_001", d))
            .unwrap();

        let record = check_out(&store, "emp_001", d, time(18, 0)).unwrap();
        assert_eq!(record.overtime_hours, dec("1"));
        assert_eq!(record.late_hours, Decimal::ZERO);
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    // =========================================================================
    // Administrative edits
    // =========================================================================

    #[test]
    fn test_create_record_computes_derived_fields() {
        let store = seeded_store();
        let record = create_record(
            &store,
            "emp_001",
            date(2025, 5, 12),
            time(9, 45),
            time(18, 30),
            AttendanceStatus::Present,
        )
        .unwrap();

        assert_eq!(record.late_hours, dec("0.75"));
        assert_eq!(record.overtime_hours, dec("1.5"));
    }

    #[test]
    fn test_create_record_rejects_duplicate_pair() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        create_record(
            &store,
            "emp_001",
            d,
            time(9, 0),
            time(17, 0),
            AttendanceStatus::Present,
        )
        .unwrap();

        let err = create_record(
            &store,
            "emp_001",
            d,
            time(9, 0),
            time(17, 0),
            AttendanceStatus::Present,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { .. }));
    }

    #[test]
    fn test_create_record_rejects_out_of_order_times() {
        let store = seeded_store();
        let err = create_record(
            &store,
            "emp_001",
            date(2025, 5, 12),
            time(17, 0),
            time(9, 0),
            AttendanceStatus::Present,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::PolicyViolation { .. }));

        let equal = create_record(
            &store,
            "emp_001",
            date(2025, 5, 12),
            time(9, 0),
            time(9, 0),
            AttendanceStatus::Present,
        );
        assert!(equal.is_err());
    }

    #[test]
    fn test_update_record_requires_existing_record() {
        let store = seeded_store();
        let err = update_record(
            &store,
            "emp_001",
            date(2025, 5, 12),
            time(9, 0),
            time(17, 0),
            AttendanceStatus::Excused,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::AttendanceNotFound { .. }));
    }

    #[test]
    fn test_update_record_rewrites_times_and_status() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 0)).unwrap();

        let record = update_record(
            &store,
            "emp_001",
            d,
            time(10, 0),
            time(17, 30),
            AttendanceStatus::Excused,
        )
        .unwrap();
        assert_eq!(record.status, AttendanceStatus::Excused);
        assert_eq!(record.late_hours, dec("1"));
        assert_eq!(record.overtime_hours, dec("0.5"));
    }

    #[test]
    fn test_delete_record_round_trip() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 0)).unwrap();

        delete_record(&store, "emp_001", d).unwrap();
        assert!(store.attendance("emp_001", d).unwrap().is_none());

        let err = delete_record(&store, "emp_001", d).unwrap_err();
        assert!(matches!(err, EngineError::AttendanceNotFound { .. }));
    }

    // =========================================================================
    // Absentee sweep
    // =========================================================================

    #[test]
    fn test_sweep_marks_missing_employee_absent() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        let report = mark_absentees(&store, d).unwrap();

        assert_eq!(report.marked, vec!["emp_001".to_string()]);
        let record = store.attendance("emp_001", d).unwrap().unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.late_hours, Decimal::ZERO);
        assert_eq!(record.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_sweep_never_creates_weekend_or_holiday_records() {
        let store = seeded_store();
        // Saturday
        let report = mark_absentees(&store, date(2025, 5, 10)).unwrap();
        assert!(report.marked.is_empty());
        assert!(
            store
                .attendance("emp_001", date(2025, 5, 10))
                .unwrap()
                .is_none()
        );

        // Holiday on a Monday
        let d = date(2025, 5, 12);
        store
            .put_holiday(crate::models::Holiday {
                date: d,
                name: "Engine Day".to_string(),
            })
            .unwrap();
        let report = mark_absentees(&store, d).unwrap();
        assert!(report.marked.is_empty());
        assert!(store.attendance("emp_001", d).unwrap().is_none());
    }

    #[test]
    fn test_sweep_skips_existing_records() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        check_in(&store, "emp_001", d, time(9, 0)).unwrap();

        let report = mark_absentees(&store, d).unwrap();
        assert!(report.marked.is_empty());
        let record = store.attendance("emp_001", d).unwrap().unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_sweep_is_idempotent_across_runs() {
        let store = seeded_store();
        let d = date(2025, 5, 12);
        let first = mark_absentees(&store, d).unwrap();
        let second = mark_absentees(&store, d).unwrap();

        assert_eq!(first.marked.len(), 1);
        assert!(second.marked.is_empty());
    }

    #[test]
    fn test_sweep_isolates_policyless_employee() {
        let store = seeded_store();
        store
            .put_employee(Employee {
                id: "emp_orphan".to_string(),
                salary: dec("1000"),
                working_hours_per_day: 8,
                default_check_in_time: time(9, 0),
                default_check_out_time: time(17, 0),
            })
            .unwrap();

        let report = mark_absentees(&store, date(2025, 5, 12)).unwrap();
        assert_eq!(report.marked, vec!["emp_001".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "emp_orphan");
        assert!(matches!(
            report.failures[0].1,
            EngineError::PolicyNotFound { .. }
        ));
    }
}
