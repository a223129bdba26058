//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load payroll configurations from YAML
//! files: regime metadata and the engine-wide calculation constants.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/el_payroll").unwrap();
//! println!("Loaded regime: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_HOURS_PER_DAY, DEFAULT_WORKING_DAYS_PER_MONTH, HOLIDAY_MULTIPLIER, PayrollConfig,
    PayrollMetadata, PayrollRules, UNHEALTHY_BONUS_RATE,
};
