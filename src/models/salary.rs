//! Reference salary input and text-entry helpers.
//!
//! This module defines [`ReferenceSalaryInput`], shared by every calculator,
//! along with the helpers that turn raw form text into clean values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::compute_reference_annual;

/// Fewest salary payments per year accepted at entry.
pub const MIN_PAYMENTS_PER_YEAR: u32 = 12;

/// Most salary payments per year accepted at entry.
pub const MAX_PAYMENTS_PER_YEAR: u32 = 14;

/// Payments per year pre-filled on a new form.
pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 13;

/// Largest monthly amount accepted at entry (one quadrillion Kz).
///
/// Keeps every product the calculators form, including daily indemnities
/// over the longest representable period, inside `Decimal` range.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// The salary figures the reference remuneration is derived from.
///
/// # Example
///
/// ```
/// use compensation_engine::models::ReferenceSalaryInput;
/// use rust_decimal::Decimal;
///
/// let salary = ReferenceSalaryInput::new(Decimal::from(100_000), Decimal::from(20_000), 13);
/// assert_eq!(salary.reference_annual(), Decimal::from(130_000));
///
/// // Out-of-range payments are clamped on entry
/// let salary = ReferenceSalaryInput::new(Decimal::from(1_000), Decimal::ZERO, 20);
/// assert_eq!(salary.payments_per_year, 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSalaryInput {
    /// Monthly base salary.
    pub base_salary_monthly: Decimal,
    /// Monthly fixed allowance.
    pub fixed_allowance_monthly: Decimal,
    /// Number of salary payments per year.
    pub payments_per_year: u32,
}

impl Default for ReferenceSalaryInput {
    fn default() -> Self {
        Self {
            base_salary_monthly: Decimal::ZERO,
            fixed_allowance_monthly: Decimal::ZERO,
            payments_per_year: DEFAULT_PAYMENTS_PER_YEAR,
        }
    }
}

impl ReferenceSalaryInput {
    /// Creates an input, clamping amounts to [0, `MAX_MONTHLY_AMOUNT`] and
    /// payments to [12, 14].
    pub fn new(
        base_salary_monthly: Decimal,
        fixed_allowance_monthly: Decimal,
        payments_per_year: u32,
    ) -> Self {
        Self {
            base_salary_monthly: clamp_amount(base_salary_monthly),
            fixed_allowance_monthly: clamp_amount(fixed_allowance_monthly),
            payments_per_year: payments_per_year
                .clamp(MIN_PAYMENTS_PER_YEAR, MAX_PAYMENTS_PER_YEAR),
        }
    }

    /// Returns the annual reference remuneration for these figures.
    ///
    /// Amounts set directly on the fields are capped at
    /// `MAX_MONTHLY_AMOUNT` here as well.
    pub fn reference_annual(&self) -> Decimal {
        compute_reference_annual(
            self.base_salary_monthly.min(MAX_MONTHLY_AMOUNT),
            self.fixed_allowance_monthly.min(MAX_MONTHLY_AMOUNT),
            self.payments_per_year,
        )
    }
}

fn clamp_amount(amount: Decimal) -> Decimal {
    amount.clamp(Decimal::ZERO, MAX_MONTHLY_AMOUNT)
}

/// Reads a whole amount typed into a formatted field.
///
/// Everything but ASCII digits is dropped, so grouping separators and the
/// currency suffix are ignored. An empty field reads as zero and anything
/// above `MAX_MONTHLY_AMOUNT` reads as that maximum.
///
/// # Example
///
/// ```
/// use compensation_engine::models::parse_amount_text;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount_text("1 250 000 Kz"), Decimal::from(1_250_000));
/// assert_eq!(parse_amount_text(""), Decimal::ZERO);
/// ```
pub fn parse_amount_text(text: &str) -> Decimal {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(Decimal::ZERO, |acc, digit| {
            (acc * Decimal::TEN + Decimal::from(digit)).min(MAX_MONTHLY_AMOUNT)
        })
}

/// Removes digits from a claimant name as it is typed.
pub fn sanitize_claimant_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_form_values() {
        let salary = ReferenceSalaryInput::default();

        assert_eq!(salary.base_salary_monthly, Decimal::ZERO);
        assert_eq!(salary.fixed_allowance_monthly, Decimal::ZERO);
        assert_eq!(salary.payments_per_year, 13);
        assert_eq!(salary.reference_annual(), Decimal::ZERO);
    }

    #[test]
    fn test_payments_clamped_to_range() {
        assert_eq!(ReferenceSalaryInput::new(dec("1"), dec("0"), 0).payments_per_year, 12);
        assert_eq!(ReferenceSalaryInput::new(dec("1"), dec("0"), 12).payments_per_year, 12);
        assert_eq!(ReferenceSalaryInput::new(dec("1"), dec("0"), 14).payments_per_year, 14);
        assert_eq!(ReferenceSalaryInput::new(dec("1"), dec("0"), 15).payments_per_year, 14);
    }

    #[test]
    fn test_negative_amounts_clamped_to_zero() {
        let salary = ReferenceSalaryInput::new(dec("-500"), dec("-1"), 13);

        assert_eq!(salary.base_salary_monthly, Decimal::ZERO);
        assert_eq!(salary.fixed_allowance_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_reference_annual_with_fourteen_payments() {
        let salary = ReferenceSalaryInput::new(dec("90000"), dec("6000"), 14);
        assert_eq!(salary.reference_annual(), dec("112000"));
    }

    #[test]
    fn test_parse_amount_text_strips_formatting() {
        assert_eq!(parse_amount_text("150.000"), dec("150000"));
        assert_eq!(parse_amount_text("Kz 75 500"), dec("75500"));
        assert_eq!(parse_amount_text("abc"), Decimal::ZERO);
    }

    #[test]
    fn test_max_monthly_amount_is_one_quadrillion() {
        assert_eq!(MAX_MONTHLY_AMOUNT, Decimal::from(1_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_amount_text_saturates_at_max_amount() {
        assert_eq!(parse_amount_text(&"9".repeat(29)), MAX_MONTHLY_AMOUNT);
        assert_eq!(parse_amount_text(&"9".repeat(60)), MAX_MONTHLY_AMOUNT);
        assert_eq!(parse_amount_text("1 000 000 000 000 000 Kz"), MAX_MONTHLY_AMOUNT);
    }

    #[test]
    fn test_amounts_above_max_clamped_on_entry() {
        let salary = ReferenceSalaryInput::new(Decimal::MAX, Decimal::MAX, 14);

        assert_eq!(salary.base_salary_monthly, MAX_MONTHLY_AMOUNT);
        assert_eq!(salary.fixed_allowance_monthly, MAX_MONTHLY_AMOUNT);
    }

    #[test]
    fn test_reference_annual_caps_fields_set_directly() {
        let salary = ReferenceSalaryInput {
            base_salary_monthly: Decimal::MAX,
            fixed_allowance_monthly: Decimal::MAX,
            payments_per_year: 14,
        };
        let capped = ReferenceSalaryInput::new(Decimal::MAX, Decimal::MAX, 14);

        assert_eq!(salary.reference_annual(), capped.reference_annual());
    }

    #[test]
    fn test_sanitize_claimant_name() {
        assert_eq!(sanitize_claimant_name("Maria 2 Silva3"), "Maria  Silva");
        assert_eq!(sanitize_claimant_name("João"), "João");
    }

    #[test]
    fn test_serialize_reference_salary() {
        let salary = ReferenceSalaryInput::new(dec("100000"), dec("20000"), 13);
        let json = serde_json::to_value(&salary).unwrap();

        assert_eq!(json["base_salary_monthly"], "100000");
        assert_eq!(json["payments_per_year"], 13);
    }
}
