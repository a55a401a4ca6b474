//! Domain models for the compensation engine.
//!
//! This module contains the input value objects each calculator consumes and
//! the result records it produces.

mod beneficiaries;
mod calculation_result;
mod incapacity;
mod period;
mod salary;

pub use beneficiaries::{
    DeathBeneficiaries, DeathInput, DeathSubsidyMultiplier, FuneralSubsidyMultiplier,
};
pub use calculation_result::{AuditStep, BeneficiaryShare, DeathResult, IppResult, ItaResult};
pub use incapacity::{IppInput, ItaInput, MAX_MEDICAL_POINTS, PeriodValidation};
pub use period::{INVALID_DAY_COUNT, PeriodInput};
pub use salary::{
    DEFAULT_PAYMENTS_PER_YEAR, MAX_MONTHLY_AMOUNT, MAX_PAYMENTS_PER_YEAR, MIN_PAYMENTS_PER_YEAR,
    ReferenceSalaryInput, parse_amount_text, sanitize_claimant_name,
};
