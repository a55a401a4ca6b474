//! Calculation factor configuration.
//!
//! This module holds the coefficients every calculator applies, the store
//! that lets an admin tune them at runtime, and the repositories that persist
//! them between sessions.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::{FactorStore, JsonFileFactorRepository};
//!
//! let store = FactorStore::open(JsonFileFactorRepository::new("./data/storage.json")).unwrap();
//! println!("Outpatient rate: {}", store.get().ita_outpatient_rate);
//! ```

mod repository;
mod store;
mod types;

pub use repository::{
    DEFAULT_FACTORS_SLOT, FactorRepository, InMemoryFactorRepository, JsonFileFactorRepository,
};
pub use store::{DEFAULT_ADMIN_SECRET, FactorStore, WRONG_SECRET_MESSAGE};
pub use types::{FactorConfiguration, FactorDomain, FactorKey};
