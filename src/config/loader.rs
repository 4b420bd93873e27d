//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file and seeding a store with it.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::Datelike;

use crate::error::{EngineError, EngineResult};
use crate::store::{HolidayStore, MemoryStore};

use super::types::EngineConfig;

/// Loads and provides access to the engine configuration.
///
/// Load-time validation enforces the invariants the calculation core relies
/// on its surroundings for: at most one holiday per date, no duplicate
/// holiday name within a calendar year, every policy referencing a configured
/// employee, and at most one policy per employee.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("{} holidays registered", loader.config().holidays.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - The content violates an invariant (`ConfigInvalid`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Builds a loader from an already-parsed configuration, applying the
    /// same validation as [`ConfigLoader::load`].
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seeds a fresh in-memory store with the configured state.
    pub fn seed(&self) -> EngineResult<MemoryStore> {
        let store = MemoryStore::new();
        for holiday in &self.config.holidays {
            store.put_holiday(holiday.clone())?;
        }
        for employee in &self.config.employees {
            store.put_employee(employee.clone())?;
        }
        for policy in &self.config.policies {
            store.put_policy(policy.clone())?;
        }
        Ok(store)
    }

    fn validate(config: &EngineConfig) -> EngineResult<()> {
        let mut dates = HashSet::new();
        let mut names_by_year: HashMap<i32, HashSet<&str>> = HashMap::new();
        for holiday in &config.holidays {
            if !dates.insert(holiday.date) {
                return Err(EngineError::ConfigInvalid {
                    message: format!("duplicate holiday date {}", holiday.date),
                });
            }
            let names = names_by_year.entry(holiday.date.year()).or_default();
            if !names.insert(holiday.name.as_str()) {
                return Err(EngineError::ConfigInvalid {
                    message: format!(
                        "duplicate holiday name '{}' in {}",
                        holiday.name,
                        holiday.date.year()
                    ),
                });
            }
        }

        let employee_ids: HashSet<&str> =
            config.employees.iter().map(|e| e.id.as_str()).collect();
        if employee_ids.len() != config.employees.len() {
            return Err(EngineError::ConfigInvalid {
                message: "duplicate employee id".to_string(),
            });
        }

        let mut policy_owners = HashSet::new();
        for policy in &config.policies {
            if !employee_ids.contains(policy.employee_id.as_str()) {
                return Err(EngineError::ConfigInvalid {
                    message: format!(
                        "policy references unknown employee '{}'",
                        policy.employee_id
                    ),
                });
            }
            if !policy_owners.insert(policy.employee_id.as_str()) {
                return Err(EngineError::ConfigInvalid {
                    message: format!(
                        "more than one policy for employee '{}'",
                        policy.employee_id
                    ),
                });
            }
        }

        Ok(())
    }
}
