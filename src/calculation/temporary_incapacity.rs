//! Temporary incapacity (ITA) calculation.
//!
//! This module provides functions for calculating the daily indemnity owed
//! for hospitalization and outpatient recovery. Hospitalization is paid at a
//! full rate up to a day limit and at a reduced rate beyond it; outpatient
//! days are paid at a single rate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::FactorConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ItaInput, ItaResult, PeriodInput};

use super::reference_salary::reference_salary_step;
use super::rounding::round_money;

/// Calculates the hospitalization indemnity at full precision.
///
/// Up to `ita_hospitalization_day_limit` days are paid at
/// `ita_hospitalization_rate`; any further days at
/// `ita_extended_hospitalization_rate`.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::hospitalization_indemnity;
/// use compensation_engine::config::FactorConfiguration;
/// use rust_decimal::Decimal;
///
/// let factors = FactorConfiguration::default();
/// let daily = Decimal::from(100);
///
/// // 30 days at 100% plus 10 days at 75%
/// assert_eq!(hospitalization_indemnity(daily, 40, &factors), Decimal::from(3750));
/// ```
pub fn hospitalization_indemnity(
    daily_remuneration: Decimal,
    days: u32,
    factors: &FactorConfiguration,
) -> Decimal {
    let limit = factors.ita_hospitalization_day_limit;

    if days <= limit {
        daily_remuneration * Decimal::from(days) * factors.ita_hospitalization_rate
    } else {
        daily_remuneration * Decimal::from(limit) * factors.ita_hospitalization_rate
            + daily_remuneration
                * Decimal::from(days - limit)
                * factors.ita_extended_hospitalization_rate
    }
}

/// Calculates the temporary incapacity indemnity.
///
/// # Arguments
///
/// * `input` - Salary figures and the two incapacity periods
/// * `factors` - The live factor configuration
///
/// # Returns
///
/// Returns the [`ItaResult`], or `InvalidPeriod` if either period ends before
/// it starts. Nothing is computed while a period is invalid. Absent or
/// incomplete periods count zero days.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_temporary_incapacity;
/// use compensation_engine::config::FactorConfiguration;
/// use compensation_engine::models::{ItaInput, PeriodInput, ReferenceSalaryInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = ItaInput {
///     salary: ReferenceSalaryInput::new(Decimal::from(100_000), Decimal::from(20_000), 13),
///     hospitalization: PeriodInput::between(
///         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
///     ),
///     outpatient: PeriodInput::default(),
/// };
///
/// let result = calculate_temporary_incapacity(&input, &FactorConfiguration::default()).unwrap();
/// assert_eq!(result.hospitalization_days, 30);
/// assert_eq!(result.total_indemnity, Decimal::from(130_000));
/// ```
pub fn calculate_temporary_incapacity(
    input: &ItaInput,
    factors: &FactorConfiguration,
) -> EngineResult<ItaResult> {
    ensure_valid(&input.hospitalization, "hospitalization")?;
    ensure_valid(&input.outpatient, "outpatient")?;

    let mut audit_steps = Vec::with_capacity(5);

    // Step 1: reference remuneration
    let reference_annual = input.salary.reference_annual();
    audit_steps.push(reference_salary_step(&input.salary, reference_annual, 1));

    // Step 2: daily remuneration
    let divisor = factors.ita_daily_divisor.get();
    let daily_remuneration = reference_annual / Decimal::from(divisor);
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "daily_remuneration".to_string(),
        rule_name: "Daily Remuneration".to_string(),
        input: serde_json::json!({
            "reference_annual": reference_annual.normalize().to_string(),
            "divisor": divisor
        }),
        output: serde_json::json!({
            "daily_remuneration": round_money(daily_remuneration).normalize().to_string()
        }),
        reasoning: format!(
            "{} ÷ {} = {}",
            reference_annual.normalize(),
            divisor,
            round_money(daily_remuneration).normalize()
        ),
    });

    // Step 3: hospitalization, tiered at the day limit
    let hospitalization_days = input.hospitalization.billable_days();
    let hospitalization_amount = round_money(hospitalization_indemnity(
        daily_remuneration,
        hospitalization_days,
        factors,
    ));
    audit_steps.push(hospitalization_step(
        daily_remuneration,
        hospitalization_days,
        hospitalization_amount,
        factors,
    ));

    // Step 4: outpatient at a single rate
    let outpatient_days = input.outpatient.billable_days();
    let outpatient_rate = factors.ita_outpatient_rate;
    let outpatient_amount =
        round_money(daily_remuneration * Decimal::from(outpatient_days) * outpatient_rate);
    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "outpatient_indemnity".to_string(),
        rule_name: "Outpatient Indemnity".to_string(),
        input: serde_json::json!({
            "days": outpatient_days,
            "daily_remuneration": round_money(daily_remuneration).normalize().to_string(),
            "rate": outpatient_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": outpatient_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} days × {} × {}% = {}",
            outpatient_days,
            round_money(daily_remuneration).normalize(),
            percent(outpatient_rate),
            outpatient_amount.normalize()
        ),
    });

    // Step 5: totals
    let total_days = hospitalization_days.saturating_add(outpatient_days);
    let total_indemnity = hospitalization_amount + outpatient_amount;
    audit_steps.push(AuditStep {
        step_number: 5,
        rule_id: "ita_total".to_string(),
        rule_name: "Total Temporary Incapacity Indemnity".to_string(),
        input: serde_json::json!({
            "hospitalization_indemnity": hospitalization_amount.normalize().to_string(),
            "outpatient_indemnity": outpatient_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_days": total_days,
            "total_indemnity": total_indemnity.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} = {} over {} days",
            hospitalization_amount.normalize(),
            outpatient_amount.normalize(),
            total_indemnity.normalize(),
            total_days
        ),
    });

    debug!(
        hospitalization_days,
        outpatient_days,
        total_indemnity = %total_indemnity,
        "Temporary incapacity calculated"
    );

    Ok(ItaResult {
        reference_annual: round_money(reference_annual),
        daily_remuneration: round_money(daily_remuneration),
        hospitalization_days,
        hospitalization_indemnity: hospitalization_amount,
        outpatient_days,
        outpatient_rate,
        outpatient_indemnity: outpatient_amount,
        total_days,
        total_indemnity,
        audit_steps,
    })
}

fn ensure_valid(period: &PeriodInput, name: &str) -> EngineResult<()> {
    match (period.start, period.end) {
        (Some(start), Some(end)) if end < start => Err(EngineError::InvalidPeriod {
            period: name.to_string(),
            start,
            end,
        }),
        _ => Ok(()),
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::from(100)).normalize()
}

fn hospitalization_step(
    daily_remuneration: Decimal,
    days: u32,
    amount: Decimal,
    factors: &FactorConfiguration,
) -> AuditStep {
    let limit = factors.ita_hospitalization_day_limit;
    let daily = round_money(daily_remuneration).normalize();
    let full_rate = percent(factors.ita_hospitalization_rate);

    let reasoning = if days <= limit {
        format!(
            "{} days × {} × {}% = {}",
            days,
            daily,
            full_rate,
            amount.normalize()
        )
    } else {
        format!(
            "First {} days × {} × {}% + {} days × {} × {}% = {}",
            limit,
            daily,
            full_rate,
            days - limit,
            daily,
            percent(factors.ita_extended_hospitalization_rate),
            amount.normalize()
        )
    };

    AuditStep {
        step_number: 3,
        rule_id: "hospitalization_indemnity".to_string(),
        rule_name: "Hospitalization Indemnity".to_string(),
        input: serde_json::json!({
            "days": days,
            "day_limit": limit,
            "daily_remuneration": daily.to_string(),
            "full_rate": factors.ita_hospitalization_rate.normalize().to_string(),
            "extended_rate": factors.ita_extended_hospitalization_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "extended_days": days.saturating_sub(limit)
        }),
        reasoning,
    }
}
