//! Partial permanent incapacity (IPP) calculation.

use tracing::debug;

use crate::models::{AuditStep, IppInput, IppResult};

use super::reference_salary::reference_salary_step;
use super::rounding::round_money;

/// Calculates the IPP pension.
///
/// `reference_annual × decree_factor × medical_ipp`. The rates are used as
/// given; they are clamped when entered on the [`IppInput`].
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_permanent_incapacity;
/// use compensation_engine::config::FactorConfiguration;
/// use compensation_engine::models::{IppInput, ReferenceSalaryInput};
/// use rust_decimal::Decimal;
///
/// let salary = ReferenceSalaryInput::new(Decimal::from(100_000), Decimal::from(20_000), 13);
/// let input = IppInput::from_factors(salary, &FactorConfiguration::default())
///     .with_medical_points(50);
///
/// let result = calculate_permanent_incapacity(&input);
/// assert_eq!(result.monthly_pension, Decimal::from(45_500));
/// ```
pub fn calculate_permanent_incapacity(input: &IppInput) -> IppResult {
    let reference_annual = input.salary.reference_annual();
    let monthly_pension = round_money(reference_annual * input.decree_factor * input.medical_ipp);

    let pension_step = AuditStep {
        step_number: 2,
        rule_id: "ipp_pension".to_string(),
        rule_name: "Partial Permanent Incapacity Pension".to_string(),
        input: serde_json::json!({
            "reference_annual": reference_annual.normalize().to_string(),
            "decree_factor": input.decree_factor.normalize().to_string(),
            "medical_ipp": input.medical_ipp.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_pension": monthly_pension.normalize().to_string()
        }),
        reasoning: format!(
            "{} × {} × {} = {}",
            reference_annual.normalize(),
            input.decree_factor.normalize(),
            input.medical_ipp.normalize(),
            monthly_pension.normalize()
        ),
    };

    debug!(monthly_pension = %monthly_pension, "Permanent incapacity calculated");

    IppResult {
        reference_annual: round_money(reference_annual),
        decree_factor: input.decree_factor,
        medical_ipp: input.medical_ipp,
        monthly_pension,
        audit_steps: vec![
            reference_salary_step(&input.salary, reference_annual, 1),
            pension_step,
        ],
    }
}
