//! # Identifier Allocator
//!
//! Issues medium ids: `last_used_id + 1`, persisted before the id is handed
//! out. Ids are never reused, across restarts included.
//!
//! Every read-modify-write of the database goes through one mutex owned by
//! the allocator, so two callers in the same process can never read the same
//! `last_used_id`. Because the persisting write happens last, a failed save
//! leaves the stored counter where it was.

use crate::error::Result;
use crate::model::{CatalogDatabase, MediumId};
use crate::store::CatalogStore;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
pub struct IdAllocator {
    lock: Mutex<()>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates and persists the next id.
    pub fn next_id<S: CatalogStore>(&self, store: &S) -> Result<MediumId> {
        self.allocate_with(store, |_, id| Ok(id))
    }

    /// Allocates the next id and hands it to `attach` together with the
    /// loaded database. Whatever `attach` changes is persisted in the same
    /// write as the new counter. If `attach` or the save fails, nothing is
    /// persisted and the id is not consumed.
    pub fn allocate_with<S, F, T>(&self, store: &S, attach: F) -> Result<T>
    where
        S: CatalogStore,
        F: FnOnce(&mut CatalogDatabase, MediumId) -> Result<T>,
    {
        self.mutate(store, |db| {
            let id = db.bump_id()?;
            debug!(id = %id, "allocated medium id");
            attach(db, id)
        })
    }

    /// Runs a serialized load → modify → save cycle on the database.
    pub fn mutate<S, F, T>(&self, store: &S, change: F) -> Result<T>
    where
        S: CatalogStore,
        F: FnOnce(&mut CatalogDatabase) -> Result<T>,
    {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut db = store.load_database()?;
        let out = change(&mut db)?;
        store.save_database(&db)?;
        Ok(out)
    }
}
