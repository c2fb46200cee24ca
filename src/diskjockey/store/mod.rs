//! # Storage Layer
//!
//! The [`CatalogStore`] trait is the only way the rest of diskjockey touches
//! persisted state. It deals in two whole documents:
//!
//! - the **config** document ([`CatalogConfig`]), and
//! - the **database** document ([`CatalogDatabase`]): the id counter, the
//!   media type vocabulary and every medium record.
//!
//! Both are read and replaced as a unit; there are no field-level updates.
//!
//! ## Guarantees
//!
//! - **First run**: loading a missing document creates it with its default
//!   value and returns that default. Callers never see "missing" as distinct
//!   from "freshly initialized".
//! - **Atomic replace**: a save either fully lands or leaves the previous
//!   document untouched. `FileStore` writes a temp file, syncs it, then renames
//!   it over the target.
//! - **No silent repair**: a document that fails to parse, or that breaks the
//!   catalog invariants, is reported as `StoreCorrupt`. It is never overwritten
//!   with defaults.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory.
//! - [`memory::InMemoryStore`]: the same JSON text held in memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json           # CatalogConfig
//! ├── data.json             # CatalogDatabase
//! ├── testing_config.json   # --testing mode
//! └── testing_data.json     # --testing mode
//! ```

use crate::config::CatalogConfig;
use crate::error::{DjError, Result};
use crate::model::CatalogDatabase;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DATA_FILENAME: &str = "data.json";
pub const TESTING_CONFIG_FILENAME: &str = "testing_config.json";
pub const TESTING_DATA_FILENAME: &str = "testing_data.json";

/// Whole-document persistence for the catalog.
///
/// Methods take `&self` so one store can be shared across threads; callers
/// that read-modify-write the database serialize themselves (see
/// [`crate::allocator::IdAllocator`]).
pub trait CatalogStore {
    /// Load the config document, creating it with defaults if missing.
    fn load_config(&self) -> Result<CatalogConfig>;

    /// Replace the config document.
    fn save_config(&self, config: &CatalogConfig) -> Result<()>;

    /// Load the database document, creating it with defaults if missing.
    fn load_database(&self) -> Result<CatalogDatabase>;

    /// Replace the database document.
    fn save_database(&self, db: &CatalogDatabase) -> Result<()>;
}

/// Where a store keeps its two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub config: PathBuf,
    pub data: PathBuf,
}

impl StorePaths {
    /// Document paths inside `dir`; `testing` selects the isolated testing files.
    pub fn in_dir(dir: impl AsRef<Path>, testing: bool) -> Self {
        let dir = dir.as_ref();
        let (config, data) = if testing {
            (TESTING_CONFIG_FILENAME, TESTING_DATA_FILENAME)
        } else {
            (CONFIG_FILENAME, DATA_FILENAME)
        };
        Self {
            config: dir.join(config),
            data: dir.join(data),
        }
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).map_err(DjError::Serialization)?;
    text.push('\n');
    Ok(text)
}

pub(crate) fn decode_config(path: &Path, text: &str) -> Result<CatalogConfig> {
    serde_json::from_str(text).map_err(|e| DjError::corrupt(path, e.to_string()))
}

pub(crate) fn decode_database(path: &Path, text: &str) -> Result<CatalogDatabase> {
    let db: CatalogDatabase =
        serde_json::from_str(text).map_err(|e| DjError::corrupt(path, e.to_string()))?;
    db.validate().map_err(|reason| DjError::corrupt(path, reason))?;
    Ok(db)
}
