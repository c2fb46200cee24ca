use super::{decode_config, decode_database, encode, CatalogStore};
use crate::config::CatalogConfig;
use crate::error::{DjError, Result};
use crate::model::CatalogDatabase;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

const CONFIG_PATH: &str = "<memory>/config.json";
const DATA_PATH: &str = "<memory>/data.json";

/// In-memory store for tests.
///
/// Keeps the serialized JSON text rather than the values, so loads go through
/// the same decoding (and corruption checks) as [`super::fs::FileStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    config: Mutex<Option<String>>,
    data: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    database_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with `StoreUnavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent load fail with `StoreUnavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Overwrite the raw database text, e.g. with something unparsable.
    pub fn set_raw_database(&self, text: &str) {
        *lock(&self.data) = Some(text.to_string());
    }

    pub fn raw_database(&self) -> Option<String> {
        lock(&self.data).clone()
    }

    /// Number of successful database saves, including first-run creation.
    pub fn database_writes(&self) -> usize {
        self.database_writes.load(Ordering::SeqCst)
    }

    fn check_read(&self, path: &str) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated(path, "read"));
        }
        Ok(())
    }

    fn check_write(&self, path: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated(path, "write"));
        }
        Ok(())
    }
}

impl CatalogStore for InMemoryStore {
    fn load_config(&self) -> Result<CatalogConfig> {
        self.check_read(CONFIG_PATH)?;
        let mut slot = lock(&self.config);
        match slot.as_deref() {
            Some(text) => decode_config(Path::new(CONFIG_PATH), text),
            None => {
                self.check_write(CONFIG_PATH)?;
                let config = CatalogConfig::default();
                *slot = Some(encode(&config)?);
                Ok(config)
            }
        }
    }

    fn save_config(&self, config: &CatalogConfig) -> Result<()> {
        self.check_write(CONFIG_PATH)?;
        let text = encode(config)?;
        *lock(&self.config) = Some(text);
        Ok(())
    }

    fn load_database(&self) -> Result<CatalogDatabase> {
        self.check_read(DATA_PATH)?;
        let mut slot = lock(&self.data);
        match slot.as_deref() {
            Some(text) => decode_database(Path::new(DATA_PATH), text),
            None => {
                self.check_write(DATA_PATH)?;
                let db = CatalogDatabase::default();
                *slot = Some(encode(&db)?);
                self.database_writes.fetch_add(1, Ordering::SeqCst);
                Ok(db)
            }
        }
    }

    fn save_database(&self, db: &CatalogDatabase) -> Result<()> {
        self.check_write(DATA_PATH)?;
        let text = encode(db)?;
        *lock(&self.data) = Some(text);
        self.database_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// A panic while holding the lock leaves only whole documents behind.
fn lock(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn simulated(path: &str, op: &str) -> DjError {
    DjError::unavailable(path, io::Error::other(format!("simulated {} failure", op)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogDate, MediumId, MediumRecord};
    use std::collections::BTreeSet;

    #[test]
    fn first_load_creates_defaults() {
        let store = InMemoryStore::new();
        assert!(store.raw_database().is_none());
        let db = store.load_database().unwrap();
        assert_eq!(db, CatalogDatabase::default());
        assert!(store.raw_database().is_some());
        assert_eq!(store.database_writes(), 1);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = InMemoryStore::new();
        let mut db = CatalogDatabase::default();
        let id = db.bump_id().unwrap();
        let mut record =
            MediumRecord::new(id, "disk", CatalogDate::today(), BTreeSet::new(), vec![]).unwrap();
        record.entries = vec!["/a".into(), "/a/b.txt".into()];
        db.append(record).unwrap();

        store.save_database(&db).unwrap();
        assert_eq!(store.load_database().unwrap(), db);
        assert_eq!(store.load_database().unwrap().disks[0].id, MediumId::new(1));
    }

    #[test]
    fn corrupt_text_is_reported_not_reset() {
        let store = InMemoryStore::new();
        store.set_raw_database("]]");
        let err = store.load_database().unwrap_err();
        assert!(matches!(err, DjError::StoreCorrupt { .. }));
        assert_eq!(store.raw_database().as_deref(), Some("]]"));
    }

    #[test]
    fn simulated_write_failure_keeps_old_document() {
        let store = InMemoryStore::new();
        store.load_database().unwrap();
        let before = store.raw_database();

        store.set_fail_writes(true);
        let mut db = CatalogDatabase::default();
        db.bump_id().unwrap();
        let err = store.save_database(&db).unwrap_err();
        assert!(matches!(err, DjError::StoreUnavailable { .. }));
        assert_eq!(store.raw_database(), before);
    }

    #[test]
    fn simulated_read_failure() {
        let store = InMemoryStore::new();
        store.set_fail_reads(true);
        assert!(matches!(
            store.load_config().unwrap_err(),
            DjError::StoreUnavailable { .. }
        ));
    }
}
