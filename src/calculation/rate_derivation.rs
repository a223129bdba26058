//! Hourly-equivalent rate derivation and premium pay.
//!
//! Statutory premiums (overtime, night, holiday) are always hourly
//! multipliers, even when the base pay is daily or monthly. This module
//! derives the hourly-equivalent rate each contract type implies and prices
//! premium hours against it.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Contract, ContractType, WorkedHours};

/// The result of deriving a contract's hourly-equivalent rate.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The derived hourly rate.
    pub rate: Decimal,
    /// The audit step recording the derivation.
    pub audit_step: AuditStep,
}

/// The premium components priced for a set of hours.
#[derive(Debug, Clone)]
pub struct PremiumPayResult {
    /// Overtime premium.
    pub overtime_pay: Decimal,
    /// Night-work premium.
    pub night_pay: Decimal,
    /// Public holiday premium.
    pub holiday_pay: Decimal,
    /// The audit step recording the pricing.
    pub audit_step: AuditStep,
}

/// Derives the hourly-equivalent rate of a contract.
///
/// - Hourly: `base_amount`
/// - Daily: `base_amount / hours_per_day`
/// - Monthly: `base_amount / (working_days_per_month × hours_per_day)`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::hourly_equivalent_rate;
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
/// let result = hourly_equivalent_rate(&contract, &PayrollRules::default(), 1);
/// assert_eq!(result.rate, Decimal::new(5, 0));
/// ```
pub fn hourly_equivalent_rate(
    contract: &Contract,
    rules: &PayrollRules,
    step_number: u32,
) -> HourlyRateResult {
    let (rate, divisor, reasoning) = match contract.contract_type {
        ContractType::Hourly => (
            contract.base_amount,
            Decimal::ONE,
            format!(
                "Hourly contract: base amount {} is already an hourly rate",
                contract.base_amount.normalize()
            ),
        ),
        ContractType::Daily => {
            let divisor = rules.hours_per_day();
            (
                contract.base_amount / divisor,
                divisor,
                format!(
                    "Daily contract: {} per day / {} hours per day",
                    contract.base_amount.normalize(),
                    divisor
                ),
            )
        }
        ContractType::Monthly => {
            let divisor = rules.hours_per_month();
            (
                contract.base_amount / divisor,
                divisor,
                format!(
                    "Monthly contract: {} per month / ({} working days x {} hours)",
                    contract.base_amount.normalize(),
                    rules.working_days_per_month,
                    rules.hours_per_day
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_equivalent_rate".to_string(),
        rule_name: "Hourly Equivalent Rate".to_string(),
        input: serde_json::json!({
            "contract_type": contract.contract_type.as_str(),
            "base_amount": contract.base_amount.normalize().to_string(),
            "divisor": divisor.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": rate.normalize().to_string()
        }),
        reasoning,
    };

    HourlyRateResult { rate, audit_step }
}

/// Prices overtime, night and holiday hours against an hourly-equivalent rate.
///
/// Each category is charged independently:
/// `hours × hourly_rate × multiplier`, where the multiplier is the contract's
/// `overtime_rate` or `night_rate`, or the statutory holiday multiplier.
/// For daily contracts this is the same as `(hours / 8) × base_amount × multiplier`.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] if a premium exceeds the decimal range.
pub fn premium_pay(
    contract: &Contract,
    hours: &WorkedHours,
    hourly_rate: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<PremiumPayResult> {
    let overtime_pay = checked_product(
        "overtime pay",
        &[hours.overtime, hourly_rate, contract.overtime_rate],
    )?;
    let night_pay = checked_product("night pay", &[hours.night, hourly_rate, contract.night_rate])?;
    let holiday_pay = checked_product(
        "holiday pay",
        &[hours.holiday, hourly_rate, rules.holiday_multiplier],
    )?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "premium_pay".to_string(),
        rule_name: "Overtime, Night and Holiday Premiums".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "overtime_hours": hours.overtime.normalize().to_string(),
            "overtime_rate": contract.overtime_rate.normalize().to_string(),
            "night_hours": hours.night.normalize().to_string(),
            "night_rate": contract.night_rate.normalize().to_string(),
            "holiday_hours": hours.holiday.normalize().to_string(),
            "holiday_multiplier": rules.holiday_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_pay": overtime_pay.normalize().to_string(),
            "night_pay": night_pay.normalize().to_string(),
            "holiday_pay": holiday_pay.normalize().to_string()
        }),
        reasoning: format!(
            "Overtime {} h x {} x {}; night {} h x {} x {}; holiday {} h x {} x {}",
            hours.overtime.normalize(),
            hourly_rate.normalize(),
            contract.overtime_rate.normalize(),
            hours.night.normalize(),
            hourly_rate.normalize(),
            contract.night_rate.normalize(),
            hours.holiday.normalize(),
            hourly_rate.normalize(),
            rules.holiday_multiplier.normalize()
        ),
    };

    Ok(PremiumPayResult {
        overtime_pay,
        night_pay,
        holiday_pay,
        audit_step,
    })
}

/// Multiplies the factors together, failing instead of panicking on overflow.
pub(crate) fn checked_product(operation: &str, factors: &[Decimal]) -> EngineResult<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| EngineError::AmountOverflow {
            operation: operation.to_string(),
        })
}

/// Adds the amounts together, failing instead of panicking on overflow.
pub(crate) fn checked_sum(operation: &str, amounts: &[Decimal]) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| EngineError::AmountOverflow {
            operation: operation.to_string(),
        })
}
