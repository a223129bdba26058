//! Worked-hours model.
//!
//! This module defines [`WorkedHours`], the four hour categories logged for
//! one day, and [`HourCategory`], used to label them in errors and audit steps.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One of the four categories of logged hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourCategory {
    /// Ordinary hours.
    Regular,
    /// Overtime hours.
    Overtime,
    /// Night-work hours.
    Night,
    /// Public holiday hours.
    Holiday,
}

impl HourCategory {
    /// All categories, in display order.
    pub const ALL: [HourCategory; 4] = [
        HourCategory::Regular,
        HourCategory::Overtime,
        HourCategory::Night,
        HourCategory::Holiday,
    ];

    /// Returns the lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            HourCategory::Regular => "regular",
            HourCategory::Overtime => "overtime",
            HourCategory::Night => "night",
            HourCategory::Holiday => "holiday",
        }
    }
}

impl fmt::Display for HourCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hours logged for a single day, split by category.
///
/// Fractional hours are allowed (e.g. 0.5 increments). Night and holiday hours
/// default to zero when absent from the input.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::WorkedHours;
/// use rust_decimal::Decimal;
///
/// let hours = WorkedHours::from_f64(8.0, 2.0, 0.0, 0.0).unwrap();
/// assert_eq!(hours.checked_total(), Some(Decimal::new(10, 0)));
///
/// assert!(WorkedHours::from_f64(8.0, -1.0, 0.0, 0.0).is_err());
/// assert!(WorkedHours::from_f64(f64::NAN, 0.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedHours {
    /// Ordinary hours worked.
    #[serde(rename = "regular_hours")]
    pub regular: Decimal,
    /// Overtime hours worked.
    #[serde(rename = "overtime_hours")]
    pub overtime: Decimal,
    /// Night hours worked.
    #[serde(rename = "night_hours", default)]
    pub night: Decimal,
    /// Public holiday hours worked.
    #[serde(rename = "holiday_hours", default)]
    pub holiday: Decimal,
}

impl WorkedHours {
    /// Creates worked hours from decimal values without validating them.
    pub fn new(regular: Decimal, overtime: Decimal, night: Decimal, holiday: Decimal) -> Self {
        Self {
            regular,
            overtime,
            night,
            holiday,
        }
    }

    /// Builds worked hours from raw floating point form input.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHours`] naming the first category whose
    /// value is negative, NaN or infinite.
    pub fn from_f64(regular: f64, overtime: f64, night: f64, holiday: f64) -> EngineResult<Self> {
        Ok(Self {
            regular: decimal_hours(HourCategory::Regular, regular)?,
            overtime: decimal_hours(HourCategory::Overtime, overtime)?,
            night: decimal_hours(HourCategory::Night, night)?,
            holiday: decimal_hours(HourCategory::Holiday, holiday)?,
        })
    }

    /// Returns the hours logged in the given category.
    pub fn get(&self, category: HourCategory) -> Decimal {
        match category {
            HourCategory::Regular => self.regular,
            HourCategory::Overtime => self.overtime,
            HourCategory::Night => self.night,
            HourCategory::Holiday => self.holiday,
        }
    }

    /// Returns the sum of all four categories, or `None` on overflow.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.regular
            .checked_add(self.overtime)?
            .checked_add(self.night)?
            .checked_add(self.holiday)
    }

    /// Adds two days' hours category by category, or `None` on overflow.
    pub fn checked_add(&self, rhs: &WorkedHours) -> Option<WorkedHours> {
        Some(WorkedHours {
            regular: self.regular.checked_add(rhs.regular)?,
            overtime: self.overtime.checked_add(rhs.overtime)?,
            night: self.night.checked_add(rhs.night)?,
            holiday: self.holiday.checked_add(rhs.holiday)?,
        })
    }

    /// Sums hours across days.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] if a category total exceeds
    /// the decimal range.
    pub fn try_sum<'a, I>(days: I) -> EngineResult<WorkedHours>
    where
        I: IntoIterator<Item = &'a WorkedHours>,
    {
        days.into_iter()
            .try_fold(WorkedHours::default(), |acc, hours| acc.checked_add(hours))
            .ok_or_else(|| EngineError::AmountOverflow {
                operation: "hour totals".to_string(),
            })
    }

    /// Rejects any negative category.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHours`] for the first negative category.
    pub fn validate(&self) -> EngineResult<()> {
        for category in HourCategory::ALL {
            let value = self.get(category);
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidHours {
                    category: category.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn decimal_hours(category: HourCategory, value: f64) -> EngineResult<Decimal> {
    let invalid = || EngineError::InvalidHours {
        category: category.to_string(),
        value: value.to_string(),
    };

    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Decimal::from_f64(value).ok_or_else(invalid)
}
