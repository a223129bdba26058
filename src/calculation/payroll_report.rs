//! Payroll report assembly.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{MonthlySummary, PayrollReport};

use super::{checked_product, checked_sum, round_to_cents};

/// Builds the payroll-report view of a monthly summary.
///
/// When `unhealthy_environment` is set, a bonus of
/// `base_salary × unhealthy_bonus_rate` (10% by default) is added on top of
/// the summary total. The summary itself is passed through untouched.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// if the bonus or the gross total exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::build_payroll_report;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::MonthlySummary;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let mut summary = MonthlySummary::empty(Uuid::new_v4(), Uuid::new_v4(), 3, 2026);
/// summary.base_salary = Decimal::new(88000, 2);
/// summary.total_salary = Decimal::new(88000, 2);
///
/// let report = build_payroll_report(summary, true, &PayrollRules::default()).unwrap();
/// assert_eq!(report.unhealthy_bonus.to_string(), "88.00");
/// assert_eq!(report.gross_total.to_string(), "968.00");
/// ```
pub fn build_payroll_report(
    summary: MonthlySummary,
    unhealthy_environment: bool,
    rules: &PayrollRules,
) -> EngineResult<PayrollReport> {
    let unhealthy_bonus = if unhealthy_environment {
        round_to_cents(checked_product(
            "unhealthy bonus",
            &[summary.base_salary, rules.unhealthy_bonus_rate],
        )?)
    } else {
        round_to_cents(Decimal::ZERO)
    };
    let gross_total = round_to_cents(checked_sum(
        "gross total",
        &[summary.total_salary, unhealthy_bonus],
    )?);

    Ok(PayrollReport {
        summary,
        unhealthy_environment,
        unhealthy_bonus,
        gross_total,
    })
}
