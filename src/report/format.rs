//! Fixed-locale display formatting for reports.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency suffix appended to formatted amounts.
pub const CURRENCY_SUFFIX: &str = "Kz";

/// Placeholder shown for an absent date.
pub const MISSING_DATE: &str = "-";

/// Formats an amount in whole currency units.
///
/// Amounts are rounded half away from zero and grouped in thousands with a
/// space.
///
/// # Examples
///
/// ```
/// use compensation_engine::report::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(1_250_000)), "1 250 000 Kz");
/// assert_eq!(format_currency(Decimal::from_str("4333.33").unwrap()), "4 333 Kz");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_thousands(&whole.abs().normalize().to_string());

    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-{} {}", grouped, CURRENCY_SUFFIX)
    } else {
        format!("{} {}", grouped, CURRENCY_SUFFIX)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a date as `dd/mm/yyyy`, or `-` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => MISSING_DATE.to_string(),
    }
}

/// Formats a timestamp as `dd/mm/yyyy HH:MM`.
pub fn format_date_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d/%m/%Y %H:%M").to_string()
}

/// Formats a rate as a percentage with one decimal (`0.7` becomes `70.0%`).
pub fn format_percentage(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", percent)
}

/// Formats a rate as a compact percentage for labels (`0.4` becomes `40%`).
pub(crate) fn rate_label(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(dec("0")), "0 Kz");
        assert_eq!(format_currency(dec("999")), "999 Kz");
        assert_eq!(format_currency(dec("1000")), "1 000 Kz");
        assert_eq!(format_currency(dec("130000")), "130 000 Kz");
        assert_eq!(format_currency(dec("178750.00")), "178 750 Kz");
        assert_eq!(format_currency(dec("12345678")), "12 345 678 Kz");
    }

    #[test]
    fn test_currency_rounds_to_whole_units() {
        assert_eq!(format_currency(dec("4333.33")), "4 333 Kz");
        assert_eq!(format_currency(dec("28166.67")), "28 167 Kz");
        assert_eq!(format_currency(dec("0.5")), "1 Kz");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(dec("-1500")), "-1 500 Kz");
        assert_eq!(format_currency(dec("-0.2")), "0 Kz");
    }

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(format_date(Some(date)), "01/02/2024");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_date_time_format() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
        assert_eq!(format_date_time(timestamp), "05/03/2024 14:07");
    }

    #[test]
    fn test_percentage_one_decimal() {
        assert_eq!(format_percentage(dec("0.7")), "70.0%");
        assert_eq!(format_percentage(dec("0.5")), "50.0%");
        assert_eq!(format_percentage(dec("0.125")), "12.5%");
        assert_eq!(format_percentage(dec("1")), "100.0%");
        assert_eq!(format_percentage(dec("0")), "0.0%");
    }

    #[test]
    fn test_rate_label() {
        assert_eq!(rate_label(dec("0.4")), "40%");
        assert_eq!(rate_label(dec("0.65")), "65%");
        assert_eq!(rate_label(dec("0.125")), "12.5%");
    }
}
