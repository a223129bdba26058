//! Monthly summary aggregation.
//!
//! This module folds a month's daily entries for one contract into hour
//! totals and recomputes the salary breakdown from those totals.
//!
//! Pay is recomputed from the summed hours, never by adding up the cached
//! `daily_wage` values: for salaried contracts the monthly base is a flat
//! amount, and summing per-day salary shares would not reproduce it.

use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Contract, ContractType, DailyEntry, MonthlySummary, PayComponents, SummaryKey, WorkedHours,
};

use super::{checked_product, hourly_equivalent_rate, premium_pay, round_to_cents};

/// Recomputes the monthly summary for one user, contract and month.
///
/// 1. Entries not belonging to `(user_id, contract_id, month, year)` are
///    ignored, even if the caller passed them in.
/// 2. Each hour category is summed across the remaining entries.
/// 3. Pay components are derived from the summed hours:
///    - Hourly: `base_salary = ΣR × base_amount`
///    - Daily: `base_salary = (ΣR / 8) × base_amount`
///    - Monthly: `base_salary = base_amount`, owed even with no entries
///
///    Premiums use the hourly-equivalent rate, holiday always at 1.75.
/// 4. `total_salary` is the sum of the components.
/// 5. Monetary outputs are rounded to cents once, at the end.
///
/// The same inputs always produce the same summary.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`] if `month` is not 1 to 12
/// - [`EngineError::ContractNotFound`] if `contract` is not the contract `contract_id` names
/// - [`EngineError::InvalidContract`] if the contract terms are out of range
/// - [`EngineError::InvalidHours`] if a stored entry carries negative hours
/// - [`EngineError::AmountOverflow`] if the totals are too large to price
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::recompute_monthly_summary;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Contract, ContractType};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let contract = Contract {
///     id: Uuid::new_v4(),
///     user_id: Uuid::new_v4(),
///     contract_type: ContractType::Monthly,
///     base_amount: Decimal::new(880, 0),
///     overtime_rate: Decimal::new(15, 1),
///     night_rate: Decimal::new(125, 2),
///     employer_name: None,
///     start_date: None,
/// };
///
/// let summary = recompute_monthly_summary(
///     contract.user_id,
///     contract.id,
///     3,
///     2026,
///     &[],
///     &contract,
///     &PayrollRules::default(),
/// )
/// .unwrap();
///
/// assert_eq!(summary.base_salary.to_string(), "880.00");
/// assert_eq!(summary.total_salary.to_string(), "880.00");
/// ```
pub fn recompute_monthly_summary(
    user_id: Uuid,
    contract_id: Uuid,
    month: u32,
    year: i32,
    entries: &[DailyEntry],
    contract: &Contract,
    rules: &PayrollRules,
) -> EngineResult<MonthlySummary> {
    SummaryKey {
        user_id,
        contract_id,
        month,
        year,
    }
    .validate()?;
    if contract.id != contract_id {
        return Err(EngineError::ContractNotFound { contract_id });
    }
    contract.validate()?;

    let scoped: Vec<&DailyEntry> = entries
        .iter()
        .filter(|entry| entry.belongs_to(user_id, contract_id, month, year))
        .collect();

    if scoped.len() != entries.len() {
        debug!(
            user_id = %user_id,
            contract_id = %contract_id,
            month,
            year,
            ignored = entries.len() - scoped.len(),
            "Ignored entries outside the requested month"
        );
    }

    scoped.iter().try_for_each(|entry| entry.hours.validate())?;
    let totals = WorkedHours::try_sum(scoped.iter().map(|entry| &entry.hours))?;

    let hourly_rate = hourly_equivalent_rate(contract, rules, 1).rate;

    let base_salary = match contract.contract_type {
        ContractType::Hourly => {
            checked_product("base salary", &[totals.regular, contract.base_amount])?
        }
        ContractType::Daily => checked_product(
            "base salary",
            &[totals.regular / rules.hours_per_day(), contract.base_amount],
        )?,
        ContractType::Monthly => contract.base_amount,
    };

    let premiums = premium_pay(contract, &totals, hourly_rate, rules, 2)?;

    let components = PayComponents {
        base_pay: base_salary,
        overtime_pay: premiums.overtime_pay,
        night_pay: premiums.night_pay,
        holiday_pay: premiums.holiday_pay,
    };
    let rounded = components.rounded();

    Ok(MonthlySummary {
        user_id,
        contract_id,
        month,
        year,
        total_regular_hours: totals.regular,
        total_overtime_hours: totals.overtime,
        total_night_hours: totals.night,
        total_holiday_hours: totals.holiday,
        days_worked: scoped.len() as u32,
        base_salary: rounded.base_pay,
        overtime_pay: rounded.overtime_pay,
        night_pay: rounded.night_pay,
        holiday_pay: rounded.holiday_pay,
        total_salary: round_to_cents(components.checked_total()?),
    })
}
