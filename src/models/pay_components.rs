//! Pay component breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{checked_sum, round_to_cents};
use crate::error::EngineResult;

/// Gross pay split into its base and premium components.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayComponents;
/// use rust_decimal::Decimal;
///
/// let components = PayComponents {
///     base_pay: Decimal::new(80, 0),
///     overtime_pay: Decimal::new(30, 0),
///     night_pay: Decimal::ZERO,
///     holiday_pay: Decimal::ZERO,
/// };
/// assert_eq!(components.checked_total().unwrap(), Decimal::new(110, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Pay for regular work (hourly wage, day rate or salary share).
    pub base_pay: Decimal,
    /// Overtime premium.
    pub overtime_pay: Decimal,
    /// Night-work premium.
    pub night_pay: Decimal,
    /// Public holiday premium.
    pub holiday_pay: Decimal,
}

impl PayComponents {
    /// Returns the sum of all components.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
    /// if the sum exceeds the decimal range.
    pub fn checked_total(&self) -> EngineResult<Decimal> {
        checked_sum(
            "total pay",
            &[
                self.base_pay,
                self.overtime_pay,
                self.night_pay,
                self.holiday_pay,
            ],
        )
    }

    /// Returns a copy with every component rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            base_pay: round_to_cents(self.base_pay),
            overtime_pay: round_to_cents(self.overtime_pay),
            night_pay: round_to_cents(self.night_pay),
            holiday_pay: round_to_cents(self.holiday_pay),
        }
    }
}
