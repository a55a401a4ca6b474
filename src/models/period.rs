//! Incapacity period model.
//!
//! This module contains the [`PeriodInput`] type used for the hospitalization
//! and outpatient periods of a temporary incapacity claim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day count reported for a period that ends before it starts.
pub const INVALID_DAY_COUNT: i64 = -1;

/// A period of incapacity bounded by two optional calendar dates.
///
/// Both endpoints are inclusive. A period with either date missing counts
/// zero days; a period ending before it starts is invalid.
///
/// # Example
///
/// ```
/// use compensation_engine::models::PeriodInput;
/// use chrono::NaiveDate;
///
/// let period = PeriodInput::between(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
/// );
/// assert_eq!(period.day_count(), 30);
///
/// let reversed = PeriodInput::between(
///     NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
/// );
/// assert!(reversed.is_invalid());
/// assert_eq!(reversed.day_count(), -1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInput {
    /// First day of the period.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day of the period.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl PeriodInput {
    /// Creates a period with both dates entered.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns true when both dates have been entered.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Returns true when the period ends before it starts.
    pub fn is_invalid(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if end < start)
    }

    /// Returns the inclusive number of days in the period.
    ///
    /// Returns 0 when either date is missing and [`INVALID_DAY_COUNT`] when
    /// the period is invalid.
    pub fn day_count(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => INVALID_DAY_COUNT,
            (Some(start), Some(end)) => (end - start).num_days() + 1,
            _ => 0,
        }
    }

    /// Returns the number of days that count towards an indemnity.
    ///
    /// Invalid and incomplete periods count zero days.
    pub fn billable_days(&self) -> u32 {
        u32::try_from(self.day_count().max(0)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_counts_one() {
        let period = PeriodInput::between(date(2024, 5, 6), date(2024, 5, 6));
        assert_eq!(period.day_count(), 1);
    }

    #[test]
    fn test_count_includes_both_endpoints() {
        let period = PeriodInput::between(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(period.day_count(), 31);
    }

    #[test]
    fn test_count_across_leap_day() {
        let period = PeriodInput::between(date(2024, 2, 28), date(2024, 3, 1));
        assert_eq!(period.day_count(), 3);
    }

    #[test]
    fn test_missing_date_counts_zero() {
        let only_start = PeriodInput {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        let only_end = PeriodInput {
            start: None,
            end: Some(date(2024, 1, 1)),
        };

        assert_eq!(only_start.day_count(), 0);
        assert_eq!(only_end.day_count(), 0);
        assert_eq!(PeriodInput::default().day_count(), 0);
        assert!(!only_start.is_invalid());
        assert!(!only_start.is_complete());
    }

    #[test]
    fn test_end_before_start_is_invalid() {
        let period = PeriodInput::between(date(2024, 2, 10), date(2024, 2, 1));

        assert!(period.is_invalid());
        assert_eq!(period.day_count(), INVALID_DAY_COUNT);
        assert_eq!(period.billable_days(), 0);
    }

    #[test]
    fn test_billable_days_matches_valid_count() {
        let period = PeriodInput::between(date(2024, 3, 1), date(2024, 4, 14));
        assert_eq!(period.billable_days(), 45);
    }

    #[test]
    fn test_deserialize_with_missing_dates() {
        let period: PeriodInput = serde_json::from_str(r#"{ "start": "2024-03-01" }"#).unwrap();

        assert_eq!(period.start, Some(date(2024, 3, 1)));
        assert_eq!(period.end, None);
    }
}
