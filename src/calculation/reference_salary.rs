//! Reference remuneration calculation.
//!
//! Every benefit is a multiple of the annual reference remuneration, so this
//! is the first step of every calculator.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ReferenceSalaryInput};

/// Months the annual payments are spread over.
const MONTHS_PER_YEAR: u32 = 12;

/// Computes the annual reference remuneration.
///
/// `((base_salary + fixed_allowance) × payments_per_year) / 12`. The function
/// is total: inputs are not validated here.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::compute_reference_annual;
/// use rust_decimal::Decimal;
///
/// let reference = compute_reference_annual(Decimal::from(100_000), Decimal::from(20_000), 13);
/// assert_eq!(reference, Decimal::from(130_000));
/// ```
pub fn compute_reference_annual(
    base_salary: Decimal,
    fixed_allowance: Decimal,
    payments_per_year: u32,
) -> Decimal {
    ((base_salary + fixed_allowance) * Decimal::from(payments_per_year))
        / Decimal::from(MONTHS_PER_YEAR)
}

/// Builds the audit step recording the reference remuneration.
pub(crate) fn reference_salary_step(
    salary: &ReferenceSalaryInput,
    reference_annual: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "reference_salary".to_string(),
        rule_name: "Reference Remuneration".to_string(),
        input: serde_json::json!({
            "base_salary_monthly": salary.base_salary_monthly.normalize().to_string(),
            "fixed_allowance_monthly": salary.fixed_allowance_monthly.normalize().to_string(),
            "payments_per_year": salary.payments_per_year
        }),
        output: serde_json::json!({
            "reference_annual": reference_annual.normalize().to_string()
        }),
        reasoning: format!(
            "(({} + {}) × {}) ÷ {} = {}",
            salary.base_salary_monthly.normalize(),
            salary.fixed_allowance_monthly.normalize(),
            salary.payments_per_year,
            MONTHS_PER_YEAR,
            reference_annual.normalize()
        ),
    }
}
