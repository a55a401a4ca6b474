//! Death pension calculation.
//!
//! Each surviving beneficiary category draws its own share of the reference
//! remuneration. Shares are independent and add up without a cap; the
//! one-off death and funeral subsidies come on top.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::FactorConfiguration;
use crate::models::{AuditStep, BeneficiaryShare, DeathInput, DeathResult};

use super::reference_salary::reference_salary_step;
use super::rounding::round_money;

/// Returns the pension rate for a number of children.
///
/// The tiers are not cumulative: three children and ten children both draw
/// the three-or-more rate.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::children_rate;
/// use compensation_engine::config::FactorConfiguration;
/// use rust_decimal::Decimal;
///
/// let factors = FactorConfiguration::default();
/// assert_eq!(children_rate(0, &factors), Decimal::ZERO);
/// assert_eq!(children_rate(2, &factors), Decimal::new(4, 1));
/// assert_eq!(children_rate(10, &factors), children_rate(3, &factors));
/// ```
pub fn children_rate(number_of_children: u32, factors: &FactorConfiguration) -> Decimal {
    match number_of_children {
        0 => Decimal::ZERO,
        1 => factors.pension_one_child,
        2 => factors.pension_two_children,
        _ => factors.pension_three_or_more_children,
    }
}

fn spouse_rate(at_retirement_age: bool, factors: &FactorConfiguration) -> Decimal {
    if at_retirement_age {
        factors.pension_spouse_retirement
    } else {
        factors.pension_spouse
    }
}

fn share(present: bool, rate: Decimal, reference_annual: Decimal) -> BeneficiaryShare {
    if !present || rate.is_zero() {
        return BeneficiaryShare::default();
    }
    BeneficiaryShare {
        rate,
        amount: round_money(reference_annual * rate),
    }
}

/// Calculates the death pension and subsidies.
///
/// # Arguments
///
/// * `input` - Salary figures, beneficiaries and subsidy selections
/// * `factors` - The live factor configuration
///
/// # Returns
///
/// The [`DeathResult`] with one [`BeneficiaryShare`] per category, the
/// monthly pension total, both subsidies and the overall total. Absent
/// categories carry a zero share.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_death_pension;
/// use compensation_engine::config::FactorConfiguration;
/// use compensation_engine::models::{DeathInput, ReferenceSalaryInput};
/// use rust_decimal::Decimal;
///
/// let factors = FactorConfiguration::default();
/// let mut input = DeathInput::from_factors(
///     ReferenceSalaryInput::new(Decimal::from(100_000), Decimal::ZERO, 12),
///     &factors,
/// );
/// input.beneficiaries.has_spouse = true;
/// input.beneficiaries.number_of_children = 2;
/// input.beneficiaries.has_father = true;
///
/// let result = calculate_death_pension(&input, &factors);
/// assert_eq!(result.monthly_pension_total, Decimal::from(80_000));
/// assert_eq!(result.death_subsidy, Decimal::from(600_000));
/// assert_eq!(result.funeral_subsidy, Decimal::from(200_000));
/// ```
pub fn calculate_death_pension(input: &DeathInput, factors: &FactorConfiguration) -> DeathResult {
    let beneficiaries = &input.beneficiaries;
    let mut audit_steps = Vec::with_capacity(4);

    // Step 1: reference remuneration
    let reference_annual = input.salary.reference_annual();
    audit_steps.push(reference_salary_step(&input.salary, reference_annual, 1));

    // Step 2: beneficiary shares
    let spouse = share(
        beneficiaries.has_spouse,
        spouse_rate(beneficiaries.spouse_at_retirement_age, factors),
        reference_annual,
    );
    let former_spouse = share(
        beneficiaries.has_former_spouse,
        spouse_rate(beneficiaries.former_spouse_at_retirement_age, factors),
        reference_annual,
    );
    let children = share(
        beneficiaries.number_of_children > 0,
        children_rate(beneficiaries.number_of_children, factors),
        reference_annual,
    );
    let father = share(beneficiaries.has_father, factors.pension_parent, reference_annual);
    let mother = share(beneficiaries.has_mother, factors.pension_parent, reference_annual);

    let monthly_pension_total =
        spouse.amount + former_spouse.amount + children.amount + father.amount + mother.amount;

    let granted: Vec<String> = [
        ("spouse", &spouse),
        ("former_spouse", &former_spouse),
        ("children", &children),
        ("father", &father),
        ("mother", &mother),
    ]
    .iter()
    .filter(|(_, granted)| granted.is_granted())
    .map(|(name, granted)| format!("{} {}", name, granted.amount.normalize()))
    .collect();

    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "beneficiary_shares".to_string(),
        rule_name: "Beneficiary Pension Shares".to_string(),
        input: serde_json::json!({
            "reference_annual": reference_annual.normalize().to_string(),
            "has_spouse": beneficiaries.has_spouse,
            "spouse_at_retirement_age": beneficiaries.spouse_at_retirement_age,
            "has_former_spouse": beneficiaries.has_former_spouse,
            "former_spouse_at_retirement_age": beneficiaries.former_spouse_at_retirement_age,
            "number_of_children": beneficiaries.number_of_children,
            "has_father": beneficiaries.has_father,
            "has_mother": beneficiaries.has_mother
        }),
        output: serde_json::json!({
            "spouse": spouse.amount.normalize().to_string(),
            "former_spouse": former_spouse.amount.normalize().to_string(),
            "children": children.amount.normalize().to_string(),
            "father": father.amount.normalize().to_string(),
            "mother": mother.amount.normalize().to_string(),
            "monthly_pension_total": monthly_pension_total.normalize().to_string()
        }),
        reasoning: if granted.is_empty() {
            "No pension beneficiaries".to_string()
        } else {
            format!(
                "{} = {}",
                granted.join(" + "),
                monthly_pension_total.normalize()
            )
        },
    });

    // Step 3: subsidies
    let death_multiplier = beneficiaries.death_subsidy_multiplier;
    let funeral_multiplier = beneficiaries.funeral_subsidy_multiplier;
    let death_subsidy = round_money(reference_annual * death_multiplier.factor());
    let funeral_subsidy = round_money(reference_annual * funeral_multiplier.factor());

    audit_steps.push(AuditStep {
        step_number: 3,
        rule_id: "death_subsidies".to_string(),
        rule_name: "Death and Funeral Subsidies".to_string(),
        input: serde_json::json!({
            "reference_annual": reference_annual.normalize().to_string(),
            "death_subsidy_multiplier": death_multiplier.value(),
            "funeral_subsidy_multiplier": funeral_multiplier.value()
        }),
        output: serde_json::json!({
            "death_subsidy": death_subsidy.normalize().to_string(),
            "funeral_subsidy": funeral_subsidy.normalize().to_string()
        }),
        reasoning: format!(
            "Death: {} × {} = {}; Funeral: {} × {} = {}",
            reference_annual.normalize(),
            death_multiplier.value(),
            death_subsidy.normalize(),
            reference_annual.normalize(),
            funeral_multiplier.value(),
            funeral_subsidy.normalize()
        ),
    });

    // Step 4: total
    let total_indemnity = monthly_pension_total + death_subsidy + funeral_subsidy;
    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "death_total".to_string(),
        rule_name: "Death Indemnity Total".to_string(),
        input: serde_json::json!({
            "monthly_pension_total": monthly_pension_total.normalize().to_string(),
            "death_subsidy": death_subsidy.normalize().to_string(),
            "funeral_subsidy": funeral_subsidy.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_indemnity": total_indemnity.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} + {} = {}",
            monthly_pension_total.normalize(),
            death_subsidy.normalize(),
            funeral_subsidy.normalize(),
            total_indemnity.normalize()
        ),
    });

    debug!(
        monthly_pension_total = %monthly_pension_total,
        total_indemnity = %total_indemnity,
        "Death pension calculated"
    );

    DeathResult {
        reference_annual: round_money(reference_annual),
        spouse,
        former_spouse,
        children,
        father,
        mother,
        monthly_pension_total,
        death_subsidy,
        funeral_subsidy,
        total_indemnity,
        audit_steps,
    }
}
