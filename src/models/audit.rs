//! Audit trace models.
//!
//! Every calculation step records its inputs, outputs and reasoning so a
//! computed wage can be explained line by line.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "hourly_equivalent_rate".to_string(),
///     rule_name: "Hourly Equivalent Rate".to_string(),
///     input: serde_json::json!({"contract_type": "monthly", "base_amount": "880"}),
///     output: serde_json::json!({"hourly_rate": "5"}),
///     reasoning: "880 / (22 x 8) = 5".to_string(),
/// };
/// assert_eq!(step.rule_id, "hourly_equivalent_rate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}
