//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfig, PayrollMetadata, PayrollRules};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/el_payroll/
/// ├── payroll.yaml   # Regime metadata
/// └── rules.yaml     # Working days, hours per day, statutory multipliers
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/el_payroll").unwrap();
/// println!("Loaded regime: {}", loader.metadata().name);
/// println!("Working days per month: {}", loader.rules().working_days_per_month);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The rules fail validation, e.g. a zero divisor (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PayrollMetadata>(&path.join("payroll.yaml"))?;

        let rules_path = path.join("rules.yaml");
        let rules = Self::load_yaml::<PayrollRules>(&rules_path)?;
        rules.validate(&rules_path.display().to_string())?;

        Ok(Self {
            config: PayrollConfig::new(metadata, rules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        self.config.metadata()
    }

    /// Returns the calculation constants.
    pub fn rules(&self) -> &PayrollRules {
        self.config.rules()
    }
}
