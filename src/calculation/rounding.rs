//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for persisted monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to cents, half away from zero, with a fixed scale of 2.
///
/// Only applied to final outputs; intermediate sums stay exact.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_cents(Decimal::from_str("45.454545").unwrap()).to_string(), "45.45");
/// assert_eq!(round_to_cents(Decimal::from_str("8.525").unwrap()).to_string(), "8.53");
/// assert_eq!(round_to_cents(Decimal::from(110)).to_string(), "110.00");
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
