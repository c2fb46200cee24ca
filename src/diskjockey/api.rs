//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for catalog operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (id strings like `"7"` or `"007"` become [`MediumId`])
//! - **Returns structured types** (`Result<CmdResult>` or domain values)
//!
//! It does no printing and holds no business logic.
//!
//! ## Generic Over CatalogStore
//!
//! `DjApi<S: CatalogStore>` is generic over the storage backend:
//! - Production: `DjApi<FileStore>`
//! - Testing: `DjApi<InMemoryStore>`
//!
//! Every method takes `&self`. Writes are serialized by the [`IdAllocator`]
//! the facade owns, so a `DjApi` can be shared between threads behind an
//! `Arc` when the store is `Sync`.

use crate::allocator::IdAllocator;
use crate::commands;
use crate::error::Result;
use crate::model::{MediumId, MediumRecord};
use crate::query::{CatalogStats, Query};
use crate::store::CatalogStore;
use std::path::{Path, PathBuf};

pub struct DjApi<S: CatalogStore> {
    store: S,
    allocator: IdAllocator,
    data_dir: PathBuf,
}

impl<S: CatalogStore> DjApi<S> {
    pub fn new(store: S, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            allocator: IdAllocator::new(),
            data_dir: data_dir.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Allocates and persists a fresh id without attaching a record.
    pub fn next_id(&self) -> Result<MediumId> {
        self.allocator.next_id(&self.store)
    }

    pub fn catalog_medium(&self, request: commands::NewMedium) -> Result<MediumRecord> {
        commands::catalog::catalog_medium(&self.store, &self.allocator, request)
    }

    pub fn add_medium(&self, request: commands::NewMedium) -> Result<CmdResult> {
        commands::catalog::run(&self.store, &self.allocator, request)
    }

    pub fn rescan_medium(&self, id: &str, root: &Path, mode: ScanMode) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::catalog::run_rescan(&self.store, &self.allocator, id, root, mode)
    }

    pub fn update_tags<T: AsRef<str>>(&self, id: MediumId, tags: &[T]) -> Result<MediumRecord> {
        commands::tags::update_tags(&self.store, &self.allocator, id, tags)
    }

    pub fn tag_medium<T: AsRef<str>>(&self, id: &str, tags: &[T]) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::tags::run(&self.store, &self.allocator, id, tags)
    }

    pub fn get_record(&self, id: MediumId) -> Result<MediumRecord> {
        commands::show::get_record(&self.store, id)
    }

    pub fn list_records(&self) -> Result<Vec<MediumRecord>> {
        commands::show::list_records(&self.store)
    }

    pub fn list_media(&self) -> Result<CmdResult> {
        commands::show::run_list(&self.store)
    }

    pub fn show_media<I: AsRef<str>>(&self, ids: &[I]) -> Result<CmdResult> {
        let ids = ids
            .iter()
            .map(|s| parse_id(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        commands::show::run_show(&self.store, &ids)
    }

    pub fn find(&self, query: &Query) -> Result<Vec<MediumRecord>> {
        commands::search::find(&self.store, query)
    }

    pub fn search(&self, query: &Query) -> Result<CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        commands::stats::catalog_stats(&self.store)
    }

    pub fn show_stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn candidate_media(&self) -> Result<CmdResult> {
        commands::media::run(&self.store)
    }

    pub fn select_medium(&self, target: Option<&str>) -> Result<PathBuf> {
        commands::media::select_medium(&self.store, target)
    }

    pub fn media_types(&self) -> Result<CmdResult> {
        commands::types::run_list(&self.store)
    }

    pub fn add_media_type(&self, name: &str) -> Result<CmdResult> {
        commands::types::run_add(&self.store, &self.allocator, name)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.store, action)
    }
}

fn parse_id(input: &str) -> Result<MediumId> {
    input.parse()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, NewMedium, ScanMode};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DjError;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn api() -> DjApi<InMemoryStore> {
        DjApi::new(InMemoryStore::new(), "/unused")
    }

    #[test]
    fn tag_accepts_unpadded_id() {
        let api = api();
        let temp = TempDir::new().unwrap();
        api.catalog_medium(NewMedium::new(temp.path())).unwrap();

        let result = api.tag_medium("1", &["music"]).unwrap();
        assert_eq!(result.affected_records[0].id.to_string(), "001");
        assert!(api.get_record(MediumId::new(1)).unwrap().has_tag("music"));
    }

    #[test]
    fn bad_id_string_is_rejected_before_store_access() {
        let api = api();
        api.store().set_fail_reads(true);
        let err = api.show_media(&["abc"]).unwrap_err();
        assert!(matches!(err, DjError::Api(_)));
    }

    #[test]
    fn rescan_dispatches_mode() {
        let api = api();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("f"), "").unwrap();
        api.catalog_medium(NewMedium::new(temp.path())).unwrap();

        api.rescan_medium("001", temp.path(), ScanMode::Append).unwrap();
        assert_eq!(api.list_records().unwrap()[0].entries.len(), 2);
        api.rescan_medium("001", temp.path(), ScanMode::Reset).unwrap();
        assert_eq!(api.list_records().unwrap()[0].entries.len(), 1);
    }

    #[test]
    fn next_id_advances_counter() {
        let api = api();
        assert_eq!(api.next_id().unwrap(), MediumId::new(1));
        assert_eq!(api.stats().unwrap().last_used_id, 1);
    }

    #[test]
    fn shared_api_issues_distinct_ids() {
        let api = Arc::new(api());
        let temp = Arc::new(TempDir::new().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let api = Arc::clone(&api);
                let temp = Arc::clone(&temp);
                thread::spawn(move || {
                    (0..5)
                        .map(|_| api.catalog_medium(NewMedium::new(temp.path())).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(|id| id.value())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(api.list_records().unwrap().len(), 20);
    }
}
