//! Monetary rounding.
//!
//! Calculators keep full precision internally and round each reported amount
//! once, here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on reported amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let money = |s: &str| round_money(Decimal::from_str(s).unwrap());
///
/// assert_eq!(money("4333.3333"), Decimal::from_str("4333.33").unwrap());
/// assert_eq!(money("0.125"), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
