//! Payroll report model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthlySummary;

/// The standalone payroll-report view of a month.
///
/// Wraps a [`MonthlySummary`] and adds the optional unhealthy-environment
/// bonus. The bonus lives only here; the persisted summary never carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The monthly summary the report is built from.
    pub summary: MonthlySummary,
    /// Whether the unhealthy-environment bonus applies.
    pub unhealthy_environment: bool,
    /// The bonus amount (zero when not applicable).
    pub unhealthy_bonus: Decimal,
    /// `summary.total_salary` plus the bonus.
    pub gross_total: Decimal,
}
