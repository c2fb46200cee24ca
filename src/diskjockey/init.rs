use crate::api::DjApi;
use crate::config::CatalogConfig;
use crate::error::{DjError, Result};
use crate::store::fs::FileStore;
use crate::store::CatalogStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the platform data directory when set.
pub const DATA_DIR_ENV: &str = "DJ_HOME";

pub struct DjContext {
    pub api: DjApi<FileStore>,
    pub config: CatalogConfig,
    pub testing: bool,
}

/// Where the catalog documents live: `$DJ_HOME`, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "diskjockey", "diskjockey")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DjError::Config("Could not determine data directory".to_string()))
}

pub fn initialize(testing: bool) -> Result<DjContext> {
    initialize_in(&data_dir()?, testing)
}

/// Opens the catalog in `dir`, creating default documents on first use.
pub fn initialize_in(dir: &Path, testing: bool) -> Result<DjContext> {
    let store = FileStore::in_dir(dir, testing);
    let config = store.load_config()?;
    debug!(dir = %dir.display(), testing, "catalog opened");
    let api = DjApi::new(store, dir);
    Ok(DjContext {
        api,
        config,
        testing,
    })
}
