//! Calculation result models for the compensation engine.
//!
//! This module contains the result records produced by each calculator and
//! the [`AuditStep`] entries that explain how every figure was reached.
//! Results are plain values: two calculations with the same input and
//! factors compare equal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use compensation_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "reference_salary".to_string(),
///     rule_name: "Reference Remuneration".to_string(),
///     input: serde_json::json!({ "base_salary_monthly": "100000" }),
///     output: serde_json::json!({ "reference_annual": "130000" }),
///     reasoning: "((100000 + 20000) × 13) ÷ 12 = 130000".to_string(),
/// };
/// assert_eq!(step.rule_id, "reference_salary");
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

/// The result of a temporary incapacity (ITA) calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItaResult {
    /// Annual reference remuneration.
    pub reference_annual: Decimal,
    /// Reference remuneration per day.
    pub daily_remuneration: Decimal,
    /// Days spent in hospital.
    pub hospitalization_days: u32,
    /// Indemnity for the hospitalization period.
    pub hospitalization_indemnity: Decimal,
    /// Days of outpatient recovery.
    pub outpatient_days: u32,
    /// Rate applied to outpatient days.
    pub outpatient_rate: Decimal,
    /// Indemnity for the outpatient period.
    pub outpatient_indemnity: Decimal,
    /// Hospitalization plus outpatient days.
    pub total_days: u32,
    /// Hospitalization plus outpatient indemnity.
    pub total_indemnity: Decimal,
    /// How each figure was reached.
    pub audit_steps: Vec<AuditStep>,
}

/// The result of a partial permanent incapacity (IPP) calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IppResult {
    /// Annual reference remuneration.
    pub reference_annual: Decimal,
    /// Decree factor applied.
    pub decree_factor: Decimal,
    /// Medical IPP rate applied.
    pub medical_ipp: Decimal,
    /// Resulting pension.
    pub monthly_pension: Decimal,
    /// How each figure was reached.
    pub audit_steps: Vec<AuditStep>,
}

/// One beneficiary category's part of a death pension.
///
/// An absent category has a zero rate and a zero amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryShare {
    /// Rate of the reference remuneration granted.
    pub rate: Decimal,
    /// Amount granted.
    pub amount: Decimal,
}

impl BeneficiaryShare {
    /// Returns true when the category draws a share.
    pub fn is_granted(&self) -> bool {
        !self.rate.is_zero()
    }
}

/// The result of a death pension calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathResult {
    /// Annual reference remuneration.
    pub reference_annual: Decimal,
    /// Current spouse's share.
    pub spouse: BeneficiaryShare,
    /// Former spouse's share.
    pub former_spouse: BeneficiaryShare,
    /// Children's share.
    pub children: BeneficiaryShare,
    /// Father's share.
    pub father: BeneficiaryShare,
    /// Mother's share.
    pub mother: BeneficiaryShare,
    /// Sum of every beneficiary share.
    pub monthly_pension_total: Decimal,
    /// Death subsidy.
    pub death_subsidy: Decimal,
    /// Funeral subsidy.
    pub funeral_subsidy: Decimal,
    /// Pension total plus both subsidies.
    pub total_indemnity: Decimal,
    /// How each figure was reached.
    pub audit_steps: Vec<AuditStep>,
}
