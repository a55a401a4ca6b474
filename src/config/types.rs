//! Calculation factor types.
//!
//! This module contains the strongly-typed [`FactorConfiguration`] record and
//! the [`FactorKey`] names under which each coefficient is persisted and
//! edited.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::serde::float;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::EngineError;

/// The semantic domain of a factor, used to clamp edited values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorDomain {
    /// A rate in [0, 1].
    Rate,
    /// A whole number >= 0 (day limits, subsidy multipliers).
    Count,
    /// A whole number >= 1.
    Divisor,
}

/// Names every coefficient in a [`FactorConfiguration`].
///
/// The string form is the key used in the persisted document.
///
/// # Example
///
/// ```
/// use compensation_engine::config::FactorKey;
///
/// let key: FactorKey = "pensaoPais".parse().unwrap();
/// assert_eq!(key, FactorKey::PensionParent);
/// assert_eq!(key.as_str(), "pensaoPais");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    /// Hospitalization rate up to the day limit.
    ItaHospitalizationRate,
    /// Hospitalization rate beyond the day limit.
    ItaExtendedHospitalizationRate,
    /// Outpatient recovery rate.
    ItaOutpatientRate,
    /// Number of hospitalization days paid at the full rate.
    ItaHospitalizationDayLimit,
    /// Divisor turning the reference remuneration into a daily amount.
    ItaDailyDivisor,
    /// Decree factor applied to every IPP pension.
    IppDecreeFactor,
    /// Medical IPP rate pre-filled on new IPP inputs.
    IppMedicalDefault,
    /// Spouse share when the spouse has reached retirement age.
    PensionSpouseRetirement,
    /// Spouse share below retirement age.
    PensionSpouse,
    /// Children share for exactly one child.
    PensionOneChild,
    /// Children share for exactly two children.
    PensionTwoChildren,
    /// Children share for three or more children.
    PensionThreeOrMoreChildren,
    /// Share for each surviving parent.
    PensionParent,
    /// Death subsidy multiplier pre-selected on new death inputs.
    DeathSubsidyMultiplier,
    /// Funeral subsidy multiplier pre-selected on new death inputs.
    FuneralSubsidyMultiplier,
}

impl FactorKey {
    /// Every factor key, in persisted-document order.
    pub const ALL: [FactorKey; 15] = [
        FactorKey::ItaHospitalizationRate,
        FactorKey::ItaExtendedHospitalizationRate,
        FactorKey::ItaOutpatientRate,
        FactorKey::ItaHospitalizationDayLimit,
        FactorKey::ItaDailyDivisor,
        FactorKey::IppDecreeFactor,
        FactorKey::IppMedicalDefault,
        FactorKey::PensionSpouseRetirement,
        FactorKey::PensionSpouse,
        FactorKey::PensionOneChild,
        FactorKey::PensionTwoChildren,
        FactorKey::PensionThreeOrMoreChildren,
        FactorKey::PensionParent,
        FactorKey::DeathSubsidyMultiplier,
        FactorKey::FuneralSubsidyMultiplier,
    ];

    /// Returns the persisted name of this factor.
    pub fn as_str(self) -> &'static str {
        match self {
            FactorKey::ItaHospitalizationRate => "itaInternamento100",
            FactorKey::ItaExtendedHospitalizationRate => "itaInternamentoApos30",
            FactorKey::ItaOutpatientRate => "itaAmbulatorio",
            FactorKey::ItaHospitalizationDayLimit => "itaLimiteDiasInternamento",
            FactorKey::ItaDailyDivisor => "itaDivisorRemuneracaoDiaria",
            FactorKey::IppDecreeFactor => "ippDecretoDefault",
            FactorKey::IppMedicalDefault => "ippMedicoDefault",
            FactorKey::PensionSpouseRetirement => "pensaoConjugeReforma",
            FactorKey::PensionSpouse => "pensaoConjugeNormal",
            FactorKey::PensionOneChild => "pensaoFilho1",
            FactorKey::PensionTwoChildren => "pensaoFilhos2",
            FactorKey::PensionThreeOrMoreChildren => "pensaoFilhos3Mais",
            FactorKey::PensionParent => "pensaoPais",
            FactorKey::DeathSubsidyMultiplier => "subsidioMorteMultiplicador",
            FactorKey::FuneralSubsidyMultiplier => "subsidioFuneralMultiplicador",
        }
    }

    /// Returns the domain edited values are clamped to.
    pub fn domain(self) -> FactorDomain {
        match self {
            FactorKey::ItaHospitalizationDayLimit
            | FactorKey::DeathSubsidyMultiplier
            | FactorKey::FuneralSubsidyMultiplier => FactorDomain::Count,
            FactorKey::ItaDailyDivisor => FactorDomain::Divisor,
            _ => FactorDomain::Rate,
        }
    }

    /// Clamps a value into this factor's domain.
    ///
    /// Rates are clamped to [0, 1]; counts and divisors are rounded to whole
    /// numbers and raised to their lower bound.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::config::FactorKey;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(FactorKey::PensionParent.clamp(Decimal::new(15, 1)), Decimal::ONE);
    /// assert_eq!(FactorKey::ItaDailyDivisor.clamp(Decimal::ZERO), Decimal::ONE);
    /// ```
    pub fn clamp(self, value: Decimal) -> Decimal {
        let max_count = Decimal::from(u32::MAX);
        match self.domain() {
            FactorDomain::Rate => value.max(Decimal::ZERO).min(Decimal::ONE),
            FactorDomain::Count => value.round().max(Decimal::ZERO).min(max_count),
            FactorDomain::Divisor => value.round().max(Decimal::ONE).min(max_count),
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FactorKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EngineError::UnknownFactor { key: s.to_string() })
    }
}

/// The coefficients used by every calculator.
///
/// Calculators trust these values as given; clamping happens only when an
/// admin edits a factor through the store. Serializes to the flat
/// key→number document that is persisted; documents are read back through
/// [`FactorConfiguration::merged_over_defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorConfiguration {
    /// Hospitalization rate up to the day limit.
    #[serde(rename = "itaInternamento100", serialize_with = "float::serialize")]
    pub ita_hospitalization_rate: Decimal,
    /// Hospitalization rate beyond the day limit.
    #[serde(rename = "itaInternamentoApos30", serialize_with = "float::serialize")]
    pub ita_extended_hospitalization_rate: Decimal,
    /// Outpatient recovery rate.
    #[serde(rename = "itaAmbulatorio", serialize_with = "float::serialize")]
    pub ita_outpatient_rate: Decimal,
    /// Hospitalization days paid at the full rate.
    #[serde(rename = "itaLimiteDiasInternamento")]
    pub ita_hospitalization_day_limit: u32,
    /// Divisor for the daily remuneration.
    #[serde(rename = "itaDivisorRemuneracaoDiaria")]
    pub ita_daily_divisor: NonZeroU32,
    /// IPP decree factor.
    #[serde(rename = "ippDecretoDefault", serialize_with = "float::serialize")]
    pub ipp_decree_factor: Decimal,
    /// Medical IPP pre-filled on new inputs.
    #[serde(rename = "ippMedicoDefault", serialize_with = "float::serialize")]
    pub ipp_medical_default: Decimal,
    /// Spouse share at retirement age.
    #[serde(rename = "pensaoConjugeReforma", serialize_with = "float::serialize")]
    pub pension_spouse_retirement: Decimal,
    /// Spouse share below retirement age.
    #[serde(rename = "pensaoConjugeNormal", serialize_with = "float::serialize")]
    pub pension_spouse: Decimal,
    /// Children share, one child.
    #[serde(rename = "pensaoFilho1", serialize_with = "float::serialize")]
    pub pension_one_child: Decimal,
    /// Children share, two children.
    #[serde(rename = "pensaoFilhos2", serialize_with = "float::serialize")]
    pub pension_two_children: Decimal,
    /// Children share, three or more children.
    #[serde(rename = "pensaoFilhos3Mais", serialize_with = "float::serialize")]
    pub pension_three_or_more_children: Decimal,
    /// Share per parent.
    #[serde(rename = "pensaoPais", serialize_with = "float::serialize")]
    pub pension_parent: Decimal,
    /// Default death subsidy multiplier.
    #[serde(rename = "subsidioMorteMultiplicador")]
    pub death_subsidy_multiplier: u32,
    /// Default funeral subsidy multiplier.
    #[serde(rename = "subsidioFuneralMultiplicador")]
    pub funeral_subsidy_multiplier: u32,
}

const THIRTY: NonZeroU32 = match NonZeroU32::new(30) {
    Some(value) => value,
    None => unreachable!(),
};

impl Default for FactorConfiguration {
    /// The statutory defaults.
    fn default() -> Self {
        Self {
            ita_hospitalization_rate: Decimal::ONE,
            ita_extended_hospitalization_rate: Decimal::new(75, 2),
            ita_outpatient_rate: Decimal::new(65, 2),
            ita_hospitalization_day_limit: 30,
            ita_daily_divisor: THIRTY,
            ipp_decree_factor: Decimal::new(7, 1),
            ipp_medical_default: Decimal::new(5, 1),
            pension_spouse_retirement: Decimal::new(4, 1),
            pension_spouse: Decimal::new(3, 1),
            pension_one_child: Decimal::new(2, 1),
            pension_two_children: Decimal::new(4, 1),
            pension_three_or_more_children: Decimal::new(6, 1),
            pension_parent: Decimal::new(1, 1),
            death_subsidy_multiplier: 6,
            funeral_subsidy_multiplier: 2,
        }
    }
}

impl FactorConfiguration {
    /// Returns the value of a factor as a decimal.
    pub fn get(&self, key: FactorKey) -> Decimal {
        match key {
            FactorKey::ItaHospitalizationRate => self.ita_hospitalization_rate,
            FactorKey::ItaExtendedHospitalizationRate => self.ita_extended_hospitalization_rate,
            FactorKey::ItaOutpatientRate => self.ita_outpatient_rate,
            FactorKey::ItaHospitalizationDayLimit => {
                Decimal::from(self.ita_hospitalization_day_limit)
            }
            FactorKey::ItaDailyDivisor => Decimal::from(self.ita_daily_divisor.get()),
            FactorKey::IppDecreeFactor => self.ipp_decree_factor,
            FactorKey::IppMedicalDefault => self.ipp_medical_default,
            FactorKey::PensionSpouseRetirement => self.pension_spouse_retirement,
            FactorKey::PensionSpouse => self.pension_spouse,
            FactorKey::PensionOneChild => self.pension_one_child,
            FactorKey::PensionTwoChildren => self.pension_two_children,
            FactorKey::PensionThreeOrMoreChildren => self.pension_three_or_more_children,
            FactorKey::PensionParent => self.pension_parent,
            FactorKey::DeathSubsidyMultiplier => Decimal::from(self.death_subsidy_multiplier),
            FactorKey::FuneralSubsidyMultiplier => Decimal::from(self.funeral_subsidy_multiplier),
        }
    }

    /// Sets a factor without clamping.
    ///
    /// Whole-number factors take the integer part of `value`. Returns `false`
    /// and leaves the configuration untouched when the value cannot be held by
    /// the factor (a negative count or a zero divisor).
    pub fn set(&mut self, key: FactorKey, value: Decimal) -> bool {
        match key.domain() {
            FactorDomain::Rate => {
                let slot = match key {
                    FactorKey::ItaHospitalizationRate => &mut self.ita_hospitalization_rate,
                    FactorKey::ItaExtendedHospitalizationRate => {
                        &mut self.ita_extended_hospitalization_rate
                    }
                    FactorKey::ItaOutpatientRate => &mut self.ita_outpatient_rate,
                    FactorKey::IppDecreeFactor => &mut self.ipp_decree_factor,
                    FactorKey::IppMedicalDefault => &mut self.ipp_medical_default,
                    FactorKey::PensionSpouseRetirement => &mut self.pension_spouse_retirement,
                    FactorKey::PensionSpouse => &mut self.pension_spouse,
                    FactorKey::PensionOneChild => &mut self.pension_one_child,
                    FactorKey::PensionTwoChildren => &mut self.pension_two_children,
                    FactorKey::PensionThreeOrMoreChildren => {
                        &mut self.pension_three_or_more_children
                    }
                    FactorKey::PensionParent => &mut self.pension_parent,
                    _ => return false,
                };
                *slot = value;
                true
            }
            FactorDomain::Count => {
                let Some(count) = value.trunc().to_u32() else {
                    return false;
                };
                match key {
                    FactorKey::ItaHospitalizationDayLimit => {
                        self.ita_hospitalization_day_limit = count
                    }
                    FactorKey::DeathSubsidyMultiplier => self.death_subsidy_multiplier = count,
                    FactorKey::FuneralSubsidyMultiplier => self.funeral_subsidy_multiplier = count,
                    _ => return false,
                }
                true
            }
            FactorDomain::Divisor => {
                match value.trunc().to_u32().and_then(NonZeroU32::new) {
                    Some(divisor) => {
                        self.ita_daily_divisor = divisor;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Builds a configuration by merging a persisted document over the defaults.
    ///
    /// Keys are read one at a time: missing keys keep their default, unknown
    /// keys are ignored, and a value that is not a usable number is discarded
    /// with a warning. A document that is not a JSON object yields the
    /// defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::config::FactorConfiguration;
    /// use rust_decimal::Decimal;
    ///
    /// let document = serde_json::json!({ "pensaoPais": 0.15, "legacyKey": 3 });
    /// let factors = FactorConfiguration::merged_over_defaults(&document);
    ///
    /// assert_eq!(factors.pension_parent, Decimal::new(15, 2));
    /// assert_eq!(factors.pension_spouse, Decimal::new(3, 1));
    /// ```
    pub fn merged_over_defaults(document: &Value) -> Self {
        let mut factors = Self::default();

        let Some(entries) = document.as_object() else {
            warn!("Persisted factor document is not an object, using defaults");
            return factors;
        };

        for key in FactorKey::ALL {
            let Some(raw) = entries.get(key.as_str()) else {
                continue;
            };
            let parsed = match raw {
                Value::Number(number) => number.as_f64().and_then(Decimal::from_f64),
                Value::String(text) => Decimal::from_str(text.trim()).ok(),
                _ => None,
            };
            let applied = parsed.is_some_and(|value| factors.set(key, value));
            if !applied {
                warn!(factor = %key, value = %raw, "Discarding unusable persisted factor");
            }
        }

        factors
    }
}
