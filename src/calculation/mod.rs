//! Calculation logic for the compensation engine.
//!
//! This module contains the reference remuneration function, monetary
//! rounding, and the three calculators: temporary incapacity (ITA), partial
//! permanent incapacity (IPP) and death pension. Every calculator takes the
//! live [`FactorConfiguration`](crate::config::FactorConfiguration) as an
//! explicit argument and is pure.

mod death_pension;
mod permanent_incapacity;
mod reference_salary;
mod rounding;
mod temporary_incapacity;

pub use death_pension::{calculate_death_pension, children_rate};
pub use permanent_incapacity::calculate_permanent_incapacity;
pub use reference_salary::compute_reference_annual;
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use temporary_incapacity::{calculate_temporary_incapacity, hospitalization_indemnity};
