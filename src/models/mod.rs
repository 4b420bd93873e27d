//! Data models for the payroll recalculation engine.
//!
//! This module contains the entity and value types the engine computes over:
//! employees, compensation policies, attendance records, holidays, payroll
//! rows, and the [`Month`] key type.

mod attendance;
mod employee;
mod holiday;
mod month;
mod payroll;
mod policy;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::Employee;
pub use holiday::Holiday;
pub use month::Month;
pub use payroll::Payroll;
pub use policy::{AdjustmentRate, CompensationPolicy};
