//! Contract model and related types.
//!
//! This module defines the [`Contract`] struct and the [`ContractType`] enum
//! for representing a pay agreement under one of the three Greek payroll
//! conventions: hourly-paid (ωρομίσθιος), daily-paid (ημερομίσθιος) and
//! salaried (μισθωτός).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The pay-structure category of a contract.
///
/// Determines how `base_amount` is interpreted and how the hourly-equivalent
/// rate for premium hours is derived.
///
/// Parsing goes through [`FromStr`], so an unrecognised type is rejected with
/// [`EngineError::InvalidContractType`] instead of falling through to a zero wage.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::ContractType;
///
/// let parsed: ContractType = "Monthly".parse().unwrap();
/// assert_eq!(parsed, ContractType::Monthly);
/// assert!("weekly".parse::<ContractType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ContractType {
    /// `base_amount` is paid per hour worked.
    Hourly,
    /// `base_amount` is paid per day worked.
    Daily,
    /// `base_amount` is the monthly salary.
    Monthly,
}

impl ContractType {
    /// Returns the canonical lowercase name of the contract type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Hourly => "hourly",
            ContractType::Daily => "daily",
            ContractType::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(ContractType::Hourly),
            "daily" => Ok(ContractType::Daily),
            "monthly" => Ok(ContractType::Monthly),
            _ => Err(EngineError::InvalidContractType {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ContractType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A pay agreement for one employment relationship.
///
/// Exactly one contract drives a given daily entry, and the contract must
/// exist before entries referencing it can be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: Uuid,
    /// The user (cook) the contract belongs to.
    pub user_id: Uuid,
    /// How `base_amount` is interpreted.
    pub contract_type: ContractType,
    /// Per-hour, per-day or per-month amount depending on `contract_type`.
    pub base_amount: Decimal,
    /// Multiplier applied to the hourly-equivalent rate for overtime hours.
    pub overtime_rate: Decimal,
    /// Multiplier applied to the hourly-equivalent rate for night hours.
    pub night_rate: Decimal,
    /// Name of the employer, if recorded.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// The date the contract started, if recorded.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Contract {
    /// Checks the range constraints on the contract's pay terms.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidContract`] if `base_amount` is negative,
    /// or if either premium multiplier is below 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Contract, ContractType};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let contract = Contract {
    ///     id: Uuid::new_v4(),
    ///     user_id: Uuid::new_v4(),
    ///     contract_type: ContractType::Hourly,
    ///     base_amount: Decimal::new(10, 0),
    ///     overtime_rate: Decimal::new(5, 1),
    ///     night_rate: Decimal::ONE,
    ///     employer_name: None,
    ///     start_date: None,
    /// };
    /// assert!(contract.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_amount < Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "base_amount".to_string(),
                message: format!("must not be negative, got {}", self.base_amount),
            });
        }
        if self.overtime_rate < Decimal::ONE {
            return Err(EngineError::InvalidContract {
                field: "overtime_rate".to_string(),
                message: format!("must be at least 1, got {}", self.overtime_rate),
            });
        }
        if self.night_rate < Decimal::ONE {
            return Err(EngineError::InvalidContract {
                field: "night_rate".to_string(),
                message: format!("must be at least 1, got {}", self.night_rate),
            });
        }
        Ok(())
    }
}
