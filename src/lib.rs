//! Workplace-accident compensation engine
//!
//! This crate calculates statutory compensation for workplace accidents:
//! temporary incapacity (ITA) indemnities, partial permanent incapacity (IPP)
//! pensions, and death pensions with their subsidies. Formula coefficients
//! live in an admin-tunable factor store, and every result can be turned into
//! a report document for display or export.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
