//! Persistence for the factor document.
//!
//! The store never touches storage directly; it goes through a
//! [`FactorRepository`], which keeps the calculators free of I/O and lets
//! tests run against memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// The slot name factors are persisted under.
pub const DEFAULT_FACTORS_SLOT: &str = "compensation-factors";

/// Durable storage for the persisted factor document.
pub trait FactorRepository {
    /// Returns the persisted document, or `None` when nothing has been saved.
    fn load(&self) -> EngineResult<Option<Value>>;

    /// Replaces the persisted document.
    fn save(&mut self, document: &Value) -> EngineResult<()>;

    /// Removes the persisted document.
    fn clear(&mut self) -> EngineResult<()>;
}

/// Keeps the factor document in memory.
///
/// # Example
///
/// ```
/// use compensation_engine::config::{FactorRepository, InMemoryFactorRepository};
///
/// let mut repository = InMemoryFactorRepository::new();
/// repository.save(&serde_json::json!({ "pensaoPais": 0.2 })).unwrap();
/// assert!(repository.load().unwrap().is_some());
///
/// repository.clear().unwrap();
/// assert!(repository.load().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactorRepository {
    document: Option<Value>,
}

impl InMemoryFactorRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds a document.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// Returns the currently held document.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }
}

impl FactorRepository for InMemoryFactorRepository {
    fn load(&self) -> EngineResult<Option<Value>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &Value) -> EngineResult<()> {
        self.document = Some(document.clone());
        Ok(())
    }

    fn clear(&mut self) -> EngineResult<()> {
        self.document = None;
        Ok(())
    }
}

/// Persists the factor document in a JSON key-value file.
///
/// The file holds a JSON object mapping slot names to documents, so several
/// slots can share one file. Only this repository's slot is ever touched.
///
/// ```text
/// {
///   "compensation-factors": { "itaInternamento100": 1.0, ... }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileFactorRepository {
    path: PathBuf,
    slot: String,
}

impl JsonFileFactorRepository {
    /// Creates a repository using [`DEFAULT_FACTORS_SLOT`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_slot(path, DEFAULT_FACTORS_SLOT)
    }

    /// Creates a repository using a named slot.
    pub fn with_slot<P: AsRef<Path>>(path: P, slot: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            slot: slot.into(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the slot name.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Reads every slot in the file. A missing file has no slots.
    fn read_slots(&self) -> EngineResult<Map<String, Value>> {
        let path_str = self.path.display().to_string();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(EngineError::StorageRead {
                    path: path_str,
                    message: err.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(slots)) => Ok(slots),
            Ok(_) => Err(EngineError::PersistedStateParse {
                slot: self.slot.clone(),
                message: format!("{} does not contain a JSON object", path_str),
            }),
            Err(err) => Err(EngineError::PersistedStateParse {
                slot: self.slot.clone(),
                message: err.to_string(),
            }),
        }
    }

    /// Reads the slots for a read-modify-write, starting over when the file
    /// is unreadable as JSON.
    fn read_slots_for_update(&self) -> EngineResult<Map<String, Value>> {
        match self.read_slots() {
            Err(EngineError::PersistedStateParse { message, .. }) => {
                warn!(
                    path = %self.path.display(),
                    error = %message,
                    "Overwriting unparseable factor storage"
                );
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_slots(&self, slots: Map<String, Value>) -> EngineResult<()> {
        let path_str = self.path.display().to_string();
        let write_error = |message: String| EngineError::StorageWrite {
            path: path_str.clone(),
            message,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(slots))
            .map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| write_error(e.to_string()))
    }
}

impl FactorRepository for JsonFileFactorRepository {
    fn load(&self) -> EngineResult<Option<Value>> {
        let mut slots = self.read_slots()?;
        Ok(slots.remove(&self.slot))
    }

    fn save(&mut self, document: &Value) -> EngineResult<()> {
        let mut slots = self.read_slots_for_update()?;
        slots.insert(self.slot.clone(), document.clone());
        self.write_slots(slots)
    }

    fn clear(&mut self) -> EngineResult<()> {
        let mut slots = self.read_slots_for_update()?;
        if slots.remove(&self.slot).is_none() {
            return Ok(());
        }
        self.write_slots(slots)
    }
}
