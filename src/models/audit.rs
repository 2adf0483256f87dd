//! Audit records describing how an amount was derived.

use serde::{Deserialize, Serialize};

/// A single step recording a calculation decision.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "day_pay_base".to_string(),
///     rule_name: "Proportional Day Pay".to_string(),
///     input: serde_json::json!({"work_days": "0.5", "rate": "150000"}),
///     output: serde_json::json!({"amount": "75000"}),
///     reasoning: "0.5 labor-days at 150,000 per day".to_string(),
/// };
/// assert_eq!(step.rule_id, "day_pay_base");
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
