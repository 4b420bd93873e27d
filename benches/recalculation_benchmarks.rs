//! Performance benchmarks for the payroll recalculation engine.
//!
//! This benchmark suite tracks the recalculation hot path:
//! - Pure payroll computation over a full month of records
//! - Business-day counting for a month
//! - Full recalculation (load, compute, upsert) against the in-memory store
//! - A whole-roster holiday fan-out
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use payroll_engine::calendar::{business_days_in_month, DEFAULT_WEEKEND_DAYS};
use payroll_engine::coordinator::{dispatch, ChangeEvent};
use payroll_engine::engine::{compute_payroll, recalculate};
use payroll_engine::models::{
    AdjustmentRate, AttendanceRecord, AttendanceStatus, CompensationPolicy, Employee, Month,
};
use payroll_engine::store::{AttendanceStore, MemoryStore};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn bench_employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        salary: Decimal::new(3000, 0),
        working_hours_per_day: 8,
        default_check_in_time: time(9, 0),
        default_check_out_time: time(17, 0),
    }
}

fn bench_policy(employee_id: &str) -> CompensationPolicy {
    CompensationPolicy {
        employee_id: employee_id.to_string(),
        deduction: AdjustmentRate::Hours {
            rate: Decimal::ONE,
        },
        overtime: AdjustmentRate::Hours {
            rate: Decimal::ONE,
        },
        weekend_days: vec!["Saturday".to_string(), "Sunday".to_string()],
    }
}

/// One record per day of May 2022, with a spread of late/overtime values.
fn month_of_records(employee_id: &str) -> Vec<AttendanceRecord> {
    Month::new(2022, 5)
        .unwrap()
        .days()
        .enumerate()
        .map(|(index, date)| AttendanceRecord {
            employee_id: employee_id.to_string(),
            date,
            check_in_time: Some(time(9, (index % 45) as u32)),
            check_out_time: Some(time(17, (index % 60) as u32)),
            late_hours: Decimal::new((index % 45) as i64, 0) / Decimal::new(60, 0),
            overtime_hours: Decimal::new((index % 60) as i64, 0) / Decimal::new(60, 0),
            status: AttendanceStatus::Present,
        })
        .collect()
}

fn seeded_store(employee_count: usize) -> MemoryStore {
    let store = MemoryStore::new();
    for index in 0..employee_count {
        let id = format!("emp_{:03}", index);
        store.put_employee(bench_employee(&id)).unwrap();
        store.put_policy(bench_policy(&id)).unwrap();
        for record in month_of_records(&id) {
            store.put_attendance(record).unwrap();
        }
    }
    store
}

/// Benchmark: pure payroll computation over a full month.
fn bench_compute_payroll(c: &mut Criterion) {
    let employee = bench_employee("emp_000");
    let policy = bench_policy("emp_000");
    let records = month_of_records("emp_000");
    let holidays = HashSet::new();
    let month = Month::new(2022, 5).unwrap();

    c.bench_function("compute_payroll_full_month", |b| {
        b.iter(|| {
            black_box(compute_payroll(
                black_box(&employee),
                black_box(&policy),
                black_box(&records),
                black_box(&holidays),
                month,
            ))
        })
    });
}

/// Benchmark: counting business days in a month.
fn bench_business_days(c: &mut Criterion) {
    let weekend: HashSet<chrono::Weekday> = DEFAULT_WEEKEND_DAYS.into_iter().collect();
    let holidays: HashSet<NaiveDate> = [NaiveDate::from_ymd_opt(2022, 5, 2).unwrap()]
        .into_iter()
        .collect();
    let month = Month::new(2022, 5).unwrap();

    c.bench_function("business_days_in_month", |b| {
        b.iter(|| {
            black_box(business_days_in_month(
                black_box(month),
                black_box(&weekend),
                black_box(&holidays),
            ))
        })
    });
}

/// Benchmark: full recalculation against the store (load, compute, upsert).
fn bench_recalculate(c: &mut Criterion) {
    let store = seeded_store(1);
    let month = Month::new(2022, 5).unwrap();

    c.bench_function("recalculate_single_pair", |b| {
        b.iter(|| black_box(recalculate(black_box(&store), "emp_000", month).unwrap()))
    });
}

/// Benchmark: holiday fan-out across rosters of increasing size.
fn bench_holiday_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("holiday_fan_out");
    for employee_count in [1usize, 10, 50] {
        let store = seeded_store(employee_count);
        let event = ChangeEvent::HolidayChanged {
            date: NaiveDate::from_ymd_opt(2022, 5, 2).unwrap(),
        };

        group.throughput(Throughput::Elements(employee_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(employee_count),
            &employee_count,
            |b, _| b.iter(|| black_box(dispatch(black_box(&store), black_box(&event)).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compute_payroll,
    bench_business_days,
    bench_recalculate,
    bench_holiday_fan_out
);
criterion_main!(benches);
