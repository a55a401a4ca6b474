//! Incapacity claim inputs.
//!
//! This module defines the inputs for the temporary incapacity (ITA) and
//! partial permanent incapacity (IPP) calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FactorConfiguration;

use super::{PeriodInput, ReferenceSalaryInput};

/// Highest medical IPP score on the points scale.
pub const MAX_MEDICAL_POINTS: u32 = 100;

/// Input for a temporary incapacity (ITA) calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItaInput {
    /// The salary figures.
    pub salary: ReferenceSalaryInput,
    /// Time spent in hospital.
    #[serde(default)]
    pub hospitalization: PeriodInput,
    /// Time spent in outpatient recovery.
    #[serde(default)]
    pub outpatient: PeriodInput,
}

/// Per-period validity flags for an [`ItaInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodValidation {
    /// The hospitalization period ends before it starts.
    pub hospitalization_invalid: bool,
    /// The outpatient period ends before it starts.
    pub outpatient_invalid: bool,
}

impl PeriodValidation {
    /// Returns true when neither period blocks the calculation.
    pub fn can_calculate(&self) -> bool {
        !self.hospitalization_invalid && !self.outpatient_invalid
    }
}

impl ItaInput {
    /// Checks both periods.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::{ItaInput, PeriodInput};
    /// use chrono::NaiveDate;
    ///
    /// let input = ItaInput {
    ///     hospitalization: PeriodInput::between(
    ///         NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    ///         NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    ///     ),
    ///     ..ItaInput::default()
    /// };
    ///
    /// let validation = input.validation();
    /// assert!(validation.hospitalization_invalid);
    /// assert!(!validation.outpatient_invalid);
    /// assert!(!validation.can_calculate());
    /// ```
    pub fn validation(&self) -> PeriodValidation {
        PeriodValidation {
            hospitalization_invalid: self.hospitalization.is_invalid(),
            outpatient_invalid: self.outpatient.is_invalid(),
        }
    }
}

/// Input for a partial permanent incapacity (IPP) calculation.
///
/// Both rates are fractions in [0, 1]; the setters clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IppInput {
    /// Name of the injured worker, for reports.
    #[serde(default)]
    pub claimant_name: String,
    /// The salary figures.
    pub salary: ReferenceSalaryInput,
    /// Decree factor applied to the pension.
    pub decree_factor: Decimal,
    /// Medically assessed incapacity rate.
    pub medical_ipp: Decimal,
}

impl IppInput {
    /// Creates an input with the decree factor and medical IPP pre-filled
    /// from the configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::config::FactorConfiguration;
    /// use compensation_engine::models::{IppInput, ReferenceSalaryInput};
    /// use rust_decimal::Decimal;
    ///
    /// let factors = FactorConfiguration::default();
    /// let input = IppInput::from_factors(ReferenceSalaryInput::default(), &factors)
    ///     .with_medical_points(35);
    ///
    /// assert_eq!(input.decree_factor, Decimal::new(7, 1));
    /// assert_eq!(input.medical_ipp, Decimal::new(35, 2));
    /// ```
    pub fn from_factors(salary: ReferenceSalaryInput, factors: &FactorConfiguration) -> Self {
        Self {
            claimant_name: String::new(),
            salary,
            decree_factor: factors.ipp_decree_factor,
            medical_ipp: factors.ipp_medical_default,
        }
    }

    /// Sets the claimant name, dropping any digits.
    pub fn with_claimant_name(mut self, name: &str) -> Self {
        self.claimant_name = super::sanitize_claimant_name(name);
        self
    }

    /// Sets the decree factor, clamped to [0, 1].
    pub fn with_decree_factor(mut self, rate: Decimal) -> Self {
        self.decree_factor = clamp_rate(rate);
        self
    }

    /// Sets the medical IPP rate, clamped to [0, 1].
    pub fn with_medical_ipp(mut self, rate: Decimal) -> Self {
        self.medical_ipp = clamp_rate(rate);
        self
    }

    /// Sets the medical IPP from a 0–100 points score, clamped to 100.
    pub fn with_medical_points(mut self, points: u32) -> Self {
        let points = points.min(MAX_MEDICAL_POINTS);
        self.medical_ipp = Decimal::from(points) / Decimal::from(MAX_MEDICAL_POINTS);
        self
    }

    /// Returns the medical IPP on the points scale.
    pub fn medical_points(&self) -> Decimal {
        (self.medical_ipp * Decimal::from(MAX_MEDICAL_POINTS)).normalize()
    }
}

fn clamp_rate(rate: Decimal) -> Decimal {
    rate.max(Decimal::ZERO).min(Decimal::ONE)
}
