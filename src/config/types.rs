//! Configuration types.
//!
//! The engine configuration seeds the holiday register and, optionally, an
//! initial roster of employees with their compensation policies. It is loaded
//! from a single YAML file by [`ConfigLoader`](super::ConfigLoader).

use serde::{Deserialize, Serialize};

use crate::models::{CompensationPolicy, Employee, Holiday};

/// The engine configuration loaded from YAML.
///
/// # YAML shape
///
/// ```yaml
/// holidays:
///   - date: 2025-05-01
///     name: Labour Day
/// employees:
///   - id: emp_001
///     salary: "3000"
///     working_hours_per_day: 8
///     default_check_in_time: "09:00:00"
///     default_check_out_time: "17:00:00"
/// policies:
///   - employee_id: emp_001
///     deduction: { unit: hours, rate: "1" }
///     overtime: { unit: hours, rate: "1.5" }
///     weekend_days: [Saturday, Sunday]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The global holiday register.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Seed employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Seed compensation policies, at most one per employee.
    #[serde(default)]
    pub policies: Vec<CompensationPolicy>,
}
