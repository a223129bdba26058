//! Monthly summary model.
//!
//! A [`MonthlySummary`] is the materialized aggregate of one contract's daily
//! entries for one calendar month. It is always rebuilt from the entries and
//! never edited on its own.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The uniqueness key of a monthly summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryKey {
    /// The user the summary belongs to.
    pub user_id: Uuid,
    /// The contract the summary covers.
    pub contract_id: Uuid,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl SummaryKey {
    /// Checks that `month` names a calendar month.
    pub fn validate(&self) -> EngineResult<()> {
        if (1..=12).contains(&self.month) {
            Ok(())
        } else {
            Err(EngineError::InvalidPeriod {
                month: self.month,
                year: self.year,
            })
        }
    }
}

impl fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}-{:02}",
            self.user_id, self.contract_id, self.year, self.month
        )
    }
}

/// Hour totals and gross salary breakdown for one contract and month.
///
/// All monetary fields are rounded to cents. `total_salary` is the sum of
/// the four pay components and never includes the unhealthy-environment bonus.
///
/// # Example
///
/// ```
/// use payroll_engine::models::MonthlySummary;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let summary = MonthlySummary::empty(Uuid::new_v4(), Uuid::new_v4(), 3, 2026);
/// assert_eq!(summary.total_salary, Decimal::ZERO);
/// assert_eq!(summary.days_worked, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The user the summary belongs to.
    pub user_id: Uuid,
    /// The contract the summary covers.
    pub contract_id: Uuid,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Sum of regular hours across the month's entries.
    pub total_regular_hours: Decimal,
    /// Sum of overtime hours across the month's entries.
    pub total_overtime_hours: Decimal,
    /// Sum of night hours across the month's entries.
    pub total_night_hours: Decimal,
    /// Sum of holiday hours across the month's entries.
    pub total_holiday_hours: Decimal,
    /// Number of entries that contributed to the totals.
    pub days_worked: u32,
    /// Base salary component.
    pub base_salary: Decimal,
    /// Overtime premium component.
    pub overtime_pay: Decimal,
    /// Night premium component.
    pub night_pay: Decimal,
    /// Holiday premium component.
    pub holiday_pay: Decimal,
    /// Sum of the four components.
    pub total_salary: Decimal,
}

impl MonthlySummary {
    /// Creates a summary with zero hours and zero pay.
    pub fn empty(user_id: Uuid, contract_id: Uuid, month: u32, year: i32) -> Self {
        Self {
            user_id,
            contract_id,
            month,
            year,
            total_regular_hours: Decimal::ZERO,
            total_overtime_hours: Decimal::ZERO,
            total_night_hours: Decimal::ZERO,
            total_holiday_hours: Decimal::ZERO,
            days_worked: 0,
            base_salary: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            night_pay: Decimal::ZERO,
            holiday_pay: Decimal::ZERO,
            total_salary: Decimal::ZERO,
        }
    }

    /// Returns the uniqueness key of the summary.
    pub fn key(&self) -> SummaryKey {
        SummaryKey {
            user_id: self.user_id,
            contract_id: self.contract_id,
            month: self.month,
            year: self.year,
        }
    }
}
