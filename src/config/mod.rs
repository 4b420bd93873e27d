//! Configuration loading and management for the payroll engine.
//!
//! This module loads the engine configuration (holiday register plus
//! optional seed employees and compensation policies) from a YAML file and
//! validates its invariants before the engine ever sees the data.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! let store = config.seed().unwrap();
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::EngineConfig;
