//! Calculation logic for the payroll engine.
//!
//! This module contains the pure pay computations: hourly-equivalent rate
//! derivation, premium pricing, the daily wage preview, the monthly summary
//! recomputation and the payroll report with its unhealthy-environment bonus.
//!
//! Nothing here touches storage. Every function is deterministic in its
//! inputs, and amounts are rounded to cents only when they leave the module.

mod daily_wage;
mod monthly_summary;
mod payroll_report;
mod rate_derivation;
mod rounding;

pub use daily_wage::{DailyWageResult, compute_daily_wage};
pub use monthly_summary::recompute_monthly_summary;
pub use payroll_report::build_payroll_report;
pub use rate_derivation::{HourlyRateResult, PremiumPayResult, hourly_equivalent_rate, premium_pay};
pub use rounding::{MONEY_DECIMAL_PLACES, round_to_cents};

pub(crate) use rate_derivation::{checked_product, checked_sum};
