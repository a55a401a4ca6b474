//! Error types for the compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine reports to its callers. Input problems that
//! are clamped silently at the editing boundary never reach this type.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the compensation engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::UnknownFactor {
///     key: "pensaoAvos".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown factor: pensaoAvos");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The persisted factor storage could not be read.
    #[error("Failed to read factor storage '{path}': {message}")]
    StorageRead {
        /// The storage location.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// The persisted factor storage could not be written.
    #[error("Failed to write factor storage '{path}': {message}")]
    StorageWrite {
        /// The storage location.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// The persisted document exists but is not valid JSON.
    #[error("Failed to parse persisted factors in slot '{slot}': {message}")]
    PersistedStateParse {
        /// The storage slot holding the document.
        slot: String,
        /// A description of the parse error.
        message: String,
    },

    /// A factor name did not match any known coefficient.
    #[error("Unknown factor: {key}")]
    UnknownFactor {
        /// The name that was not recognised.
        key: String,
    },

    /// A write to the factor store was attempted without an admin session.
    #[error("Admin session required to modify calculation factors")]
    AdminRequired,

    /// A period ends before it starts.
    #[error("Invalid {period} period: end date {end} is before start date {start}")]
    InvalidPeriod {
        /// Which period was invalid (e.g. "hospitalization").
        period: String,
        /// The entered start date.
        start: NaiveDate,
        /// The entered end date.
        end: NaiveDate,
    },

    /// A subsidy multiplier outside its allowed set.
    #[error("Unsupported {subsidy} subsidy multiplier: {value}")]
    UnsupportedMultiplier {
        /// Which subsidy the multiplier was for.
        subsidy: String,
        /// The rejected multiplier.
        value: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
