//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Assumed working days in a month for salaried contracts.
pub const DEFAULT_WORKING_DAYS_PER_MONTH: u32 = 22;

/// Assumed hours in a working day.
pub const DEFAULT_HOURS_PER_DAY: u32 = 8;

/// Statutory multiplier for hours worked on a public holiday (175%).
pub const HOLIDAY_MULTIPLIER: Decimal = Decimal::from_parts(175, 0, 0, false, 2);

/// Unhealthy-environment bonus as a fraction of base salary (10%).
pub const UNHEALTHY_BONUS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Metadata about the payroll regime.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollMetadata {
    /// Short code for the regime (e.g., "EL-PAYROLL").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The jurisdiction the rules come from.
    pub jurisdiction: String,
    /// The version or effective date of the rules.
    pub version: String,
}

/// Engine-wide constants used to derive rates and premiums.
///
/// These are the same for every contract. The defaults are the statutory
/// Greek values.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.working_days_per_month, 22);
/// assert_eq!(rules.hours_per_day, 8);
/// assert_eq!(rules.holiday_multiplier, Decimal::new(175, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// Working days assumed per month for salaried contracts.
    pub working_days_per_month: u32,
    /// Hours assumed per working day.
    pub hours_per_day: u32,
    /// Multiplier applied to holiday hours.
    pub holiday_multiplier: Decimal,
    /// Fraction of base salary paid as the unhealthy-environment bonus.
    pub unhealthy_bonus_rate: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            working_days_per_month: DEFAULT_WORKING_DAYS_PER_MONTH,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            holiday_multiplier: HOLIDAY_MULTIPLIER,
            unhealthy_bonus_rate: UNHEALTHY_BONUS_RATE,
        }
    }
}

impl PayrollRules {
    /// Hours per day as a decimal divisor.
    pub fn hours_per_day(&self) -> Decimal {
        Decimal::from(self.hours_per_day)
    }

    /// Working days per month as a decimal divisor.
    pub fn working_days_per_month(&self) -> Decimal {
        Decimal::from(self.working_days_per_month)
    }

    /// Working hours per month (`working_days_per_month × hours_per_day`).
    pub fn hours_per_month(&self) -> Decimal {
        self.working_days_per_month() * self.hours_per_day()
    }

    /// Checks that the rules can be used as divisors and multipliers.
    ///
    /// `source` names where the rules came from and is used in the error.
    pub fn validate(&self, source: &str) -> EngineResult<()> {
        let problem = if self.working_days_per_month == 0 {
            Some("working_days_per_month must be greater than zero")
        } else if self.hours_per_day == 0 {
            Some("hours_per_day must be greater than zero")
        } else if self.holiday_multiplier < Decimal::ONE {
            Some("holiday_multiplier must be at least 1")
        } else if self.unhealthy_bonus_rate < Decimal::ZERO {
            Some("unhealthy_bonus_rate must not be negative")
        } else {
            None
        };

        match problem {
            Some(message) => Err(EngineError::ConfigParseError {
                path: source.to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Regime metadata.
    metadata: PayrollMetadata,
    /// Calculation constants.
    rules: PayrollRules,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: PayrollMetadata, rules: PayrollRules) -> Self {
        Self { metadata, rules }
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns the calculation constants.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }
}
