//! Daily wage calculation.
//!
//! This module converts one day's logged hours and a contract's pay terms into
//! a gross daily wage. It is a pure computation: no rounding, no I/O.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, Contract, ContractType, PayComponents, WorkedHours};

use super::{checked_product, hourly_equivalent_rate, premium_pay};

/// The result of a daily wage calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWageResult {
    /// Gross pay for the day (sum of the components, unrounded).
    pub wage: Decimal,
    /// Gross pay split into base and premium components.
    pub components: PayComponents,
    /// The hourly-equivalent rate premiums were priced against.
    pub hourly_equivalent_rate: Decimal,
    /// The audit steps recording the calculation.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the gross wage for one day's hours under a contract.
///
/// Behaviour by contract type:
/// - **Hourly**: every category is charged at its multiplier of `base_amount`;
///   regular hours at 1×.
/// - **Daily**: base pay is the flat `base_amount` regardless of regular hours
///   (a day worked is atomic); premium hours are pro-rated against an
///   8-hour day.
/// - **Monthly**: base pay is `base_amount / 22`; premium hours are priced at
///   `base_amount / (22 × 8)`.
///
/// Holiday hours always use the statutory 1.75 multiplier.
///
/// # Errors
///
/// - [`EngineError::InvalidHours`](crate::error::EngineError::InvalidHours) if any hour category is negative
/// - [`EngineError::InvalidContract`](crate::error::EngineError::InvalidContract) if the contract terms are out of range
/// - [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow) if the hours or terms are too large to price
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_daily_wage;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Contract, ContractType, WorkedHours};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let contract = Contract {
///     id: Uuid::new_v4(),
///     user_id: Uuid::new_v4(),
///     contract_type: ContractType::Hourly,
///     base_amount: Decimal::from_str("10").unwrap(),
///     overtime_rate: Decimal::from_str("1.5").unwrap(),
///     night_rate: Decimal::from_str("1.25").unwrap(),
///     employer_name: None,
///     start_date: None,
/// };
/// let hours = WorkedHours::from_f64(8.0, 2.0, 0.0, 0.0).unwrap();
///
/// let result = compute_daily_wage(&contract, &hours, &PayrollRules::default()).unwrap();
/// // 8 x 10 + 2 x 10 x 1.5 = 110
/// assert_eq!(result.wage, Decimal::from_str("110").unwrap());
/// ```
pub fn compute_daily_wage(
    contract: &Contract,
    hours: &WorkedHours,
    rules: &PayrollRules,
) -> EngineResult<DailyWageResult> {
    hours.validate()?;
    contract.validate()?;

    let mut audit_steps = Vec::with_capacity(3);

    let rate = hourly_equivalent_rate(contract, rules, 1);
    let hourly_rate = rate.rate;
    audit_steps.push(rate.audit_step);

    let (base_pay, reasoning) = match contract.contract_type {
        ContractType::Hourly => (
            checked_product("base pay", &[hours.regular, contract.base_amount])?,
            format!(
                "{} regular hours x {} per hour",
                hours.regular.normalize(),
                contract.base_amount.normalize()
            ),
        ),
        ContractType::Daily => (
            contract.base_amount,
            format!(
                "Flat day rate {} regardless of {} regular hours",
                contract.base_amount.normalize(),
                hours.regular.normalize()
            ),
        ),
        ContractType::Monthly => (
            contract.base_amount / rules.working_days_per_month(),
            format!(
                "Daily share of salary: {} / {} working days",
                contract.base_amount.normalize(),
                rules.working_days_per_month
            ),
        ),
    };
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "daily_base_pay".to_string(),
        rule_name: "Daily Base Pay".to_string(),
        input: serde_json::json!({
            "contract_type": contract.contract_type.as_str(),
            "base_amount": contract.base_amount.normalize().to_string(),
            "regular_hours": hours.regular.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pay": base_pay.normalize().to_string()
        }),
        reasoning,
    });

    let premiums = premium_pay(contract, hours, hourly_rate, rules, 3)?;
    audit_steps.push(premiums.audit_step);

    let components = PayComponents {
        base_pay,
        overtime_pay: premiums.overtime_pay,
        night_pay: premiums.night_pay,
        holiday_pay: premiums.holiday_pay,
    };

    Ok(DailyWageResult {
        wage: components.checked_total()?,
        components,
        hourly_equivalent_rate: hourly_rate,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_to_cents;
    use crate::error::EngineError;
    use proptest::prelude::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_contract(
        contract_type: ContractType,
        base_amount: &str,
        overtime_rate: &str,
        night_rate: &str,
    ) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            contract_type,
            base_amount: dec(base_amount),
            overtime_rate: dec(overtime_rate),
            night_rate: dec(night_rate),
            employer_name: None,
            start_date: None,
        }
    }

    fn hours(regular: &str, overtime: &str, night: &str, holiday: &str) -> WorkedHours {
        WorkedHours::new(dec(regular), dec(overtime), dec(night), dec(holiday))
    }

    // ==========================================================================
    // Hourly contracts
    // ==========================================================================

    #[test]
    fn test_hourly_8_regular_2_overtime() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "2", "0", "0"), &PayrollRules::default())
                .unwrap();

        assert_eq!(result.components.base_pay, dec("80"));
        assert_eq!(result.components.overtime_pay, dec("30"));
        assert_eq!(result.wage, dec("110"));
        assert_eq!(round_to_cents(result.wage).to_string(), "110.00");
    }

    #[test]
    fn test_hourly_all_categories() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("6", "1", "2", "3"), &PayrollRules::default())
                .unwrap();

        // 60 + 15 + 25 + 52.5
        assert_eq!(result.components.night_pay, dec("25"));
        assert_eq!(result.components.holiday_pay, dec("52.5"));
        assert_eq!(result.wage, dec("152.5"));
    }

    #[test]
    fn test_hourly_half_hour_increments() {
        let contract = create_contract(ContractType::Hourly, "9.80", "1.2", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("7.5", "0.5", "0", "0"), &PayrollRules::default())
                .unwrap();

        // 7.5 x 9.80 + 0.5 x 9.80 x 1.2 = 73.50 + 5.88
        assert_eq!(result.wage, dec("79.38"));
    }

    // ==========================================================================
    // Daily contracts
    // ==========================================================================

    #[test]
    fn test_daily_overtime_is_pro_rated() {
        let contract = create_contract(ContractType::Daily, "40", "1.2", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("0", "4", "0", "0"), &PayrollRules::default())
                .unwrap();

        assert_eq!(result.components.overtime_pay, dec("24"));
        assert_eq!(result.wage, dec("64"));
    }

    #[test]
    fn test_daily_base_ignores_regular_hours() {
        let contract = create_contract(ContractType::Daily, "40", "1.2", "1.25");
        let rules = PayrollRules::default();

        let short_day = compute_daily_wage(&contract, &hours("4", "0", "0", "0"), &rules).unwrap();
        let full_day = compute_daily_wage(&contract, &hours("8", "0", "0", "0"), &rules).unwrap();

        assert_eq!(short_day.components.base_pay, dec("40"));
        assert_eq!(full_day.components.base_pay, dec("40"));
    }

    #[test]
    fn test_daily_night_and_holiday_pro_rated() {
        let contract = create_contract(ContractType::Daily, "48", "1.2", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "0", "2", "8"), &PayrollRules::default())
                .unwrap();

        // night: 2/8 x 48 x 1.25 = 15; holiday: 8/8 x 48 x 1.75 = 84
        assert_eq!(result.components.night_pay, dec("15"));
        assert_eq!(result.components.holiday_pay, dec("84"));
        assert_eq!(result.wage, dec("147"));
    }

    // ==========================================================================
    // Monthly contracts
    // ==========================================================================

    #[test]
    fn test_monthly_base_is_daily_share() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "0", "0", "0"), &PayrollRules::default())
                .unwrap();

        assert_eq!(result.components.base_pay, dec("40"));
        assert_eq!(result.hourly_equivalent_rate, dec("5"));
    }

    #[test]
    fn test_monthly_overtime_uses_hourly_equivalent() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "2", "1", "0"), &PayrollRules::default())
                .unwrap();

        // overtime 2 x 5 x 1.5 = 15; night 1 x 5 x 1.25 = 6.25
        assert_eq!(result.components.overtime_pay, dec("15"));
        assert_eq!(result.components.night_pay, dec("6.25"));
        assert_eq!(result.wage, dec("61.25"));
    }

    #[test]
    fn test_monthly_non_terminating_rate_rounds_at_the_end() {
        let contract = create_contract(ContractType::Monthly, "1000", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "1", "0", "0"), &PayrollRules::default())
                .unwrap();

        // 1000 / 22 = 45.4545..., 1 x (1000 / 176) x 1.5 = 8.5227...
        assert_eq!(round_to_cents(result.wage), dec("53.98"));
    }

    // ==========================================================================
    // Edge cases
    // ==========================================================================

    #[test]
    fn test_zero_base_amount_gives_zero_wage() {
        for contract_type in [ContractType::Hourly, ContractType::Daily, ContractType::Monthly] {
            let contract = create_contract(contract_type, "0", "1.5", "1.25");
            let result =
                compute_daily_wage(&contract, &hours("8", "2", "2", "2"), &PayrollRules::default())
                    .unwrap();
            assert_eq!(result.wage, Decimal::ZERO, "{:?}", contract_type);
            assert_eq!(result.components.checked_total().unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_negative_hours_rejected() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "-1", "0", "0"), &PayrollRules::default());

        match result {
            Err(EngineError::InvalidHours { category, value }) => {
                assert_eq!(category, "overtime");
                assert_eq!(value, "-1");
            }
            other => panic!("Expected InvalidHours, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_contract_rejected() {
        let contract = create_contract(ContractType::Hourly, "10", "0.5", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "0", "0", "0"), &PayrollRules::default());
        assert!(matches!(result, Err(EngineError::InvalidContract { .. })));
    }

    #[test]
    fn test_huge_hours_fail_instead_of_panicking() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5", "1.25");
        let huge = WorkedHours::from_f64(1e28, 0.0, 0.0, 0.0).unwrap();
        assert!(huge.validate().is_ok());

        match compute_daily_wage(&contract, &huge, &PayrollRules::default()) {
            Err(EngineError::AmountOverflow { operation }) => assert_eq!(operation, "base pay"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_premium_hours_fail_for_every_contract_type() {
        for contract_type in [ContractType::Hourly, ContractType::Daily, ContractType::Monthly] {
            let contract = create_contract(contract_type, "5000", "1.5", "1.25");
            let huge = WorkedHours::from_f64(8.0, 0.0, 0.0, 7e28).unwrap();

            let result = compute_daily_wage(&contract, &huge, &PayrollRules::default());
            assert!(
                matches!(result, Err(EngineError::AmountOverflow { .. })),
                "{:?}: {:?}",
                contract_type,
                result
            );
        }
    }

    #[test]
    fn test_audit_steps_in_order() {
        let contract = create_contract(ContractType::Daily, "40", "1.2", "1.25");
        let result =
            compute_daily_wage(&contract, &hours("8", "4", "0", "0"), &PayrollRules::default())
                .unwrap();

        let rule_ids: Vec<&str> = result
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["hourly_equivalent_rate", "daily_base_pay", "premium_pay"]
        );
        let step_numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3]);
        assert!(result.audit_steps[1].reasoning.contains("Flat day rate 40"));
    }

    fn contract_type_strategy() -> impl Strategy<Value = ContractType> {
        prop_oneof![
            Just(ContractType::Hourly),
            Just(ContractType::Daily),
            Just(ContractType::Monthly),
        ]
    }

    proptest! {
        #[test]
        fn prop_wage_is_never_negative(
            contract_type in contract_type_strategy(),
            base_cents in 0i64..500_000,
            overtime_rate in 100i64..300,
            night_rate in 100i64..300,
            regular in 0i64..48,
            overtime in 0i64..24,
            night in 0i64..24,
            holiday in 0i64..24,
        ) {
            let contract = Contract {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                contract_type,
                base_amount: Decimal::new(base_cents, 2),
                overtime_rate: Decimal::new(overtime_rate, 2),
                night_rate: Decimal::new(night_rate, 2),
                employer_name: None,
                start_date: None,
            };
            // Half-hour increments
            let hours = WorkedHours::new(
                Decimal::new(regular * 5, 1),
                Decimal::new(overtime * 5, 1),
                Decimal::new(night * 5, 1),
                Decimal::new(holiday * 5, 1),
            );

            let result = compute_daily_wage(&contract, &hours, &PayrollRules::default()).unwrap();
            prop_assert!(result.wage >= Decimal::ZERO);
            prop_assert_eq!(result.wage, result.components.checked_total().unwrap());
        }

        #[test]
        fn prop_negative_hours_always_rejected(
            contract_type in contract_type_strategy(),
            negative in 1i64..1000,
            category in 0usize..4,
        ) {
            let contract = Contract {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                contract_type,
                base_amount: Decimal::new(1000, 2),
                overtime_rate: Decimal::new(150, 2),
                night_rate: Decimal::new(125, 2),
                employer_name: None,
                start_date: None,
            };
            let mut values = [Decimal::ZERO; 4];
            values[category] = Decimal::new(-negative, 1);
            let hours = WorkedHours::new(values[0], values[1], values[2], values[3]);

            let result = compute_daily_wage(&contract, &hours, &PayrollRules::default());
            let is_invalid_hours = matches!(result, Err(EngineError::InvalidHours { .. }));
            prop_assert!(is_invalid_hours);
        }
    }
}
