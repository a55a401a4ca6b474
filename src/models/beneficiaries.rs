//! Death pension beneficiaries and subsidy multipliers.
//!
//! This module defines who survives the worker, which subsidy multipliers
//! were selected, and the [`DeathInput`] that carries them to the calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::FactorConfiguration;
use crate::error::EngineError;

use super::ReferenceSalaryInput;

/// Multiplier of the reference remuneration paid as death subsidy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DeathSubsidyMultiplier {
    /// Six times the reference remuneration.
    #[default]
    Six,
    /// Seven times the reference remuneration.
    Seven,
}

impl DeathSubsidyMultiplier {
    /// Every selectable multiplier.
    pub const ALL: [DeathSubsidyMultiplier; 2] =
        [DeathSubsidyMultiplier::Six, DeathSubsidyMultiplier::Seven];

    /// Returns the multiplier as a number.
    pub fn value(self) -> u32 {
        match self {
            DeathSubsidyMultiplier::Six => 6,
            DeathSubsidyMultiplier::Seven => 7,
        }
    }

    /// Returns the multiplier as a decimal factor.
    pub fn factor(self) -> Decimal {
        Decimal::from(self.value())
    }
}

impl TryFrom<u32> for DeathSubsidyMultiplier {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(DeathSubsidyMultiplier::Six),
            7 => Ok(DeathSubsidyMultiplier::Seven),
            _ => Err(EngineError::UnsupportedMultiplier {
                subsidy: "death".to_string(),
                value,
            }),
        }
    }
}

impl From<DeathSubsidyMultiplier> for u32 {
    fn from(multiplier: DeathSubsidyMultiplier) -> Self {
        multiplier.value()
    }
}

/// Multiplier of the reference remuneration paid as funeral subsidy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FuneralSubsidyMultiplier {
    /// Twice the reference remuneration.
    #[default]
    Two,
    /// Four times the reference remuneration.
    Four,
    /// Five times the reference remuneration.
    Five,
}

impl FuneralSubsidyMultiplier {
    /// Every selectable multiplier.
    pub const ALL: [FuneralSubsidyMultiplier; 3] = [
        FuneralSubsidyMultiplier::Two,
        FuneralSubsidyMultiplier::Four,
        FuneralSubsidyMultiplier::Five,
    ];

    /// Returns the multiplier as a number.
    pub fn value(self) -> u32 {
        match self {
            FuneralSubsidyMultiplier::Two => 2,
            FuneralSubsidyMultiplier::Four => 4,
            FuneralSubsidyMultiplier::Five => 5,
        }
    }

    /// Returns the multiplier as a decimal factor.
    pub fn factor(self) -> Decimal {
        Decimal::from(self.value())
    }
}

impl TryFrom<u32> for FuneralSubsidyMultiplier {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(FuneralSubsidyMultiplier::Two),
            4 => Ok(FuneralSubsidyMultiplier::Four),
            5 => Ok(FuneralSubsidyMultiplier::Five),
            _ => Err(EngineError::UnsupportedMultiplier {
                subsidy: "funeral".to_string(),
                value,
            }),
        }
    }
}

impl From<FuneralSubsidyMultiplier> for u32 {
    fn from(multiplier: FuneralSubsidyMultiplier) -> Self {
        multiplier.value()
    }
}

/// The surviving beneficiaries and the selected subsidy multipliers.
///
/// Categories are independent: a current and a former spouse may both draw
/// a share, as may both parents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathBeneficiaries {
    /// A current spouse survives.
    pub has_spouse: bool,
    /// The current spouse has reached retirement age.
    pub spouse_at_retirement_age: bool,
    /// A former spouse is entitled to a share.
    pub has_former_spouse: bool,
    /// The former spouse has reached retirement age.
    pub former_spouse_at_retirement_age: bool,
    /// Number of dependent children.
    pub number_of_children: u32,
    /// The father survives.
    pub has_father: bool,
    /// The mother survives.
    pub has_mother: bool,
    /// Selected death subsidy multiplier.
    pub death_subsidy_multiplier: DeathSubsidyMultiplier,
    /// Selected funeral subsidy multiplier.
    pub funeral_subsidy_multiplier: FuneralSubsidyMultiplier,
}

impl DeathBeneficiaries {
    /// Creates an empty beneficiary set with the multipliers pre-selected
    /// from the configuration.
    ///
    /// A configured default outside the selectable set falls back to the
    /// statutory default (6 for death, 2 for funeral).
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::config::FactorConfiguration;
    /// use compensation_engine::models::{DeathBeneficiaries, FuneralSubsidyMultiplier};
    ///
    /// let mut factors = FactorConfiguration::default();
    /// factors.funeral_subsidy_multiplier = 4;
    ///
    /// let beneficiaries = DeathBeneficiaries::from_factors(&factors);
    /// assert_eq!(beneficiaries.funeral_subsidy_multiplier, FuneralSubsidyMultiplier::Four);
    /// ```
    pub fn from_factors(factors: &FactorConfiguration) -> Self {
        let death_subsidy_multiplier =
            DeathSubsidyMultiplier::try_from(factors.death_subsidy_multiplier).unwrap_or_else(
                |err| {
                    warn!(error = %err, "Configured death subsidy multiplier not selectable");
                    DeathSubsidyMultiplier::default()
                },
            );
        let funeral_subsidy_multiplier =
            FuneralSubsidyMultiplier::try_from(factors.funeral_subsidy_multiplier).unwrap_or_else(
                |err| {
                    warn!(error = %err, "Configured funeral subsidy multiplier not selectable");
                    FuneralSubsidyMultiplier::default()
                },
            );

        Self {
            death_subsidy_multiplier,
            funeral_subsidy_multiplier,
            ..Self::default()
        }
    }

    /// Returns true when at least one pension beneficiary is present.
    pub fn has_pension_beneficiaries(&self) -> bool {
        self.has_spouse
            || self.has_former_spouse
            || self.number_of_children > 0
            || self.has_father
            || self.has_mother
    }
}

/// Input for a death pension calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathInput {
    /// Name of the deceased worker, for reports.
    #[serde(default)]
    pub claimant_name: String,
    /// The salary figures.
    pub salary: ReferenceSalaryInput,
    /// Surviving beneficiaries and subsidy selections.
    #[serde(default)]
    pub beneficiaries: DeathBeneficiaries,
}

impl DeathInput {
    /// Creates an input with no beneficiaries and configured multipliers.
    pub fn from_factors(salary: ReferenceSalaryInput, factors: &FactorConfiguration) -> Self {
        Self {
            claimant_name: String::new(),
            salary,
            beneficiaries: DeathBeneficiaries::from_factors(factors),
        }
    }

    /// Sets the claimant name, dropping any digits.
    pub fn with_claimant_name(mut self, name: &str) -> Self {
        self.claimant_name = super::sanitize_claimant_name(name);
        self
    }
}
