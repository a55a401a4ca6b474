//! The live factor configuration for a session.
//!
//! This module provides the [`FactorStore`] type, which owns the one live
//! [`FactorConfiguration`], gates edits behind an admin session, and writes
//! every change through its [`FactorRepository`] before returning.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::repository::FactorRepository;
use super::types::{FactorConfiguration, FactorKey};

/// The shared secret accepted by [`FactorStore::authenticate`] unless another
/// one is supplied.
pub const DEFAULT_ADMIN_SECRET: &str = "Admin2026";

/// Message shown to a user whose admin secret was rejected.
pub const WRONG_SECRET_MESSAGE: &str = "Incorrect password";

/// Owns the live factor configuration and its persistence.
///
/// Reads are always served from memory and reflect the last successful
/// write. Writes require an admin session and reach the repository before
/// the in-memory configuration changes, so a failed save leaves the store
/// untouched.
///
/// # Example
///
/// ```
/// use compensation_engine::config::{FactorKey, FactorStore, InMemoryFactorRepository};
/// use rust_decimal::Decimal;
///
/// let mut store = FactorStore::open(InMemoryFactorRepository::new())?;
/// assert!(store.authenticate("Admin2026"));
///
/// store.update(FactorKey::ItaOutpatientRate, Decimal::new(70, 2))?;
/// assert_eq!(store.get().ita_outpatient_rate, Decimal::new(70, 2));
/// # Ok::<(), compensation_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct FactorStore<R: FactorRepository> {
    factors: FactorConfiguration,
    repository: R,
    admin_secret: String,
    is_admin: bool,
}

impl<R: FactorRepository> FactorStore<R> {
    /// Opens the store with [`DEFAULT_ADMIN_SECRET`].
    ///
    /// See [`FactorStore::open_with_secret`].
    pub fn open(repository: R) -> EngineResult<Self> {
        Self::open_with_secret(repository, DEFAULT_ADMIN_SECRET)
    }

    /// Opens the store, merging any persisted document over the defaults.
    ///
    /// # Returns
    ///
    /// Returns the store on success, or `StorageRead` if the repository could
    /// not be read. A persisted document that does not parse is logged and
    /// replaced by the defaults.
    pub fn open_with_secret(repository: R, admin_secret: impl Into<String>) -> EngineResult<Self> {
        let factors = match repository.load() {
            Ok(Some(document)) => FactorConfiguration::merged_over_defaults(&document),
            Ok(None) => FactorConfiguration::default(),
            Err(EngineError::PersistedStateParse { slot, message }) => {
                warn!(slot = %slot, error = %message, "Ignoring unparseable persisted factors");
                FactorConfiguration::default()
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            factors,
            repository,
            admin_secret: admin_secret.into(),
            is_admin: false,
        })
    }

    /// Returns the live configuration.
    pub fn get(&self) -> &FactorConfiguration {
        &self.factors
    }

    /// Returns the backing repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns true while an admin session is open.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Opens an admin session if `secret` matches the shared secret verbatim.
    ///
    /// A wrong secret returns `false` and leaves any existing session as is.
    pub fn authenticate(&mut self, secret: &str) -> bool {
        if secret == self.admin_secret {
            self.is_admin = true;
            info!("Admin session opened");
            true
        } else {
            warn!(reason = WRONG_SECRET_MESSAGE, "Admin authentication rejected");
            false
        }
    }

    /// Closes the admin session.
    pub fn logout(&mut self) {
        if self.is_admin {
            info!("Admin session closed");
        }
        self.is_admin = false;
    }

    /// Sets one factor, clamped to its domain, and persists the result.
    ///
    /// # Returns
    ///
    /// Returns the value actually stored after clamping, or an error if:
    /// - No admin session is open (`AdminRequired`)
    /// - The repository could not be written
    pub fn update(&mut self, key: FactorKey, value: Decimal) -> EngineResult<Decimal> {
        self.require_admin()?;

        let clamped = key.clamp(value);
        let mut next = self.factors.clone();
        // clamp() always yields a value the factor can hold
        next.set(key, clamped);

        self.persist(&next)?;
        self.factors = next;

        info!(factor = %key, requested = %value, stored = %clamped, "Factor updated");
        Ok(clamped)
    }

    /// Sets one factor by its persisted name.
    ///
    /// Fails with `UnknownFactor` when `name` is not a factor key.
    pub fn update_by_name(&mut self, name: &str, value: Decimal) -> EngineResult<Decimal> {
        let key: FactorKey = name.parse()?;
        self.update(key, value)
    }

    /// Restores the statutory defaults and clears the persisted document.
    pub fn reset(&mut self) -> EngineResult<()> {
        self.require_admin()?;

        self.repository.clear()?;
        self.factors = FactorConfiguration::default();

        info!("Factors reset to statutory defaults");
        Ok(())
    }

    fn require_admin(&self) -> EngineResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(EngineError::AdminRequired)
        }
    }

    fn persist(&mut self, factors: &FactorConfiguration) -> EngineResult<()> {
        let document = serde_json::to_value(factors).map_err(|e| EngineError::StorageWrite {
            path: "factor document".to_string(),
            message: e.to_string(),
        })?;
        self.repository.save(&document)
    }
}
