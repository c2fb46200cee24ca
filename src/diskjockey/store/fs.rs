use super::{decode_config, decode_database, encode, CatalogStore, StorePaths};
use crate::config::CatalogConfig;
use crate::error::{DjError, Result};
use crate::model::CatalogDatabase;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// JSON documents on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: StorePaths,
}

impl FileStore {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Store whose documents live in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, testing: bool) -> Self {
        Self::new(StorePaths::in_dir(dir, testing))
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Reads a document, or `None` if it does not exist yet.
    fn read_document(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "read document");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DjError::unavailable(path, e)),
        }
    }

    fn write_document<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let text = encode(value)?;
        write_atomic(path, &text)?;
        debug!(path = %path.display(), bytes = text.len(), "wrote document");
        Ok(())
    }

    /// Decodes the document at `path`, creating it with its default value if
    /// it does not exist. A document that appears between the read and the
    /// create wins over the default.
    fn load_or_create<T: Serialize + Default>(
        &self,
        path: &Path,
        decode: fn(&Path, &str) -> Result<T>,
    ) -> Result<T> {
        if let Some(text) = self.read_document(path)? {
            return decode(path, &text);
        }

        let value = T::default();
        if write_new(path, &encode(&value)?)? {
            info!(path = %path.display(), "created default document");
            return Ok(value);
        }

        debug!(path = %path.display(), "document created concurrently, reading it");
        match self.read_document(path)? {
            Some(text) => decode(path, &text),
            None => Err(DjError::unavailable(
                path,
                io::Error::new(io::ErrorKind::NotFound, "document vanished after creation"),
            )),
        }
    }
}

impl CatalogStore for FileStore {
    fn load_config(&self) -> Result<CatalogConfig> {
        self.load_or_create(&self.paths.config, decode_config)
    }

    fn save_config(&self, config: &CatalogConfig) -> Result<()> {
        self.write_document(&self.paths.config, config)
    }

    fn load_database(&self) -> Result<CatalogDatabase> {
        self.load_or_create(&self.paths.data, decode_database)
    }

    fn save_database(&self, db: &CatalogDatabase) -> Result<()> {
        self.write_document(&self.paths.data, db)
    }
}

fn document_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn temp_path(dir: &Path, path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");
    dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()))
}

fn remove_temp(tmp_path: &Path) {
    if let Err(e) = fs::remove_file(tmp_path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %tmp_path.display(), error = %e, "failed to remove temp file");
        }
    }
}

/// Replaces `path` with `contents` so readers see either the old or the new
/// document, never a mix.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = document_dir(path);
    fs::create_dir_all(dir).map_err(|e| DjError::unavailable(dir, e))?;

    let tmp_path = temp_path(dir, path);
    if let Err(e) = write_synced(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path)) {
        remove_temp(&tmp_path);
        return Err(DjError::unavailable(path, e));
    }

    sync_dir(dir);
    Ok(())
}

/// Creates `path` with `contents` only if nothing exists there yet. Returns
/// `false` without touching the existing file otherwise.
///
/// The complete temp file is hard-linked into place, so the document appears
/// fully written or not at all, and an existing one is never replaced.
fn write_new(path: &Path, contents: &str) -> Result<bool> {
    let dir = document_dir(path);
    fs::create_dir_all(dir).map_err(|e| DjError::unavailable(dir, e))?;

    let tmp_path = temp_path(dir, path);
    let linked = write_synced(&tmp_path, contents).and_then(|()| fs::hard_link(&tmp_path, path));
    remove_temp(&tmp_path);

    match linked {
        Ok(()) => {
            sync_dir(dir);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(DjError::unavailable(path, e)),
    }
}

fn write_synced(tmp_path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

// Persist the rename itself; best effort, the data is already synced.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        debug!(path = %dir.display(), error = %e, "directory sync failed");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");
        write_atomic(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_new_never_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        assert!(write_new(&path, "first").unwrap());
        assert!(!write_new(&path, "second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "leftover temp files: {:?}", leftovers);
    }

    #[test]
    fn default_creation_yields_to_a_saved_document() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::in_dir(temp.path(), false);

        // Another writer lands its catalog before the default is created.
        let mut saved = CatalogDatabase::default();
        saved.bump_id().unwrap();
        let text = encode(&saved).unwrap();
        write_atomic(&store.paths().data, &text).unwrap();
        let default_text = encode(&CatalogDatabase::default()).unwrap();
        assert!(!write_new(&store.paths().data, &default_text).unwrap());

        assert_eq!(store.load_database().unwrap(), saved);
        assert_eq!(fs::read_to_string(&store.paths().data).unwrap(), text);
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let temp = TempDir::new().unwrap();
        // A non-empty directory at the target makes the rename fail.
        let target = temp.path().join("doc.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = write_atomic(&target, "data").unwrap_err();
        assert!(matches!(err, DjError::StoreUnavailable { .. }));

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "leftover temp files: {:?}", leftovers);
    }
}
