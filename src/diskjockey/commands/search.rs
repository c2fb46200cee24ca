use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DjError, Result};
use crate::model::MediumRecord;
use crate::query::{self, Query};
use crate::store::CatalogStore;

/// Records matching `query`, in insertion order.
pub fn find<S: CatalogStore>(store: &S, query: &Query) -> Result<Vec<MediumRecord>> {
    if let Query::Path(fragment) = query {
        if fragment.trim().is_empty() {
            return Err(DjError::Api("Path to search for cannot be empty".to_string()));
        }
    }
    let db = store.load_database()?;
    Ok(query::run(&db.disks, query).into_iter().cloned().collect())
}

pub fn run<S: CatalogStore>(store: &S, query: &Query) -> Result<CmdResult> {
    let found = find(store, query)?;
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No media match {} {:?}",
            query.kind(),
            query.term()
        )));
    }
    Ok(result.with_listed_records(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::IdAllocator;
    use crate::commands::{catalog, NewMedium};
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_by_tag_after_cataloging() {
        let store = InMemoryStore::new();
        let alloc = IdAllocator::new();
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let first = catalog::catalog_medium(
            &store,
            &alloc,
            NewMedium::new(a.path()).with_tags(["music"]),
        )
        .unwrap();
        catalog::catalog_medium(&store, &alloc, NewMedium::new(b.path()).with_tags(["video"]))
            .unwrap();

        let music = find(&store, &Query::Tag("music".into())).unwrap();
        assert_eq!(music, vec![first]);

        let games = run(&store, &Query::Tag("games".into())).unwrap();
        assert!(games.listed_records.is_empty());
        assert_eq!(games.messages.len(), 1);
    }

    #[test]
    fn finds_which_disk_has_a_file() {
        let store = InMemoryStore::new();
        let alloc = IdAllocator::new();
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("movies")).unwrap();
        fs::write(temp.path().join("movies/a.mkv"), "").unwrap();
        let record = catalog::catalog_medium(&store, &alloc, NewMedium::new(temp.path())).unwrap();

        for fragment in ["a.mkv", "/movies/a.mkv"] {
            let found = find(&store, &Query::Path(fragment.into())).unwrap();
            assert_eq!(found, vec![record.clone()], "fragment {}", fragment);
        }
        assert!(find(&store, &Query::Path("b.mkv".into())).unwrap().is_empty());
    }

    #[test]
    fn empty_path_is_rejected() {
        let store = InMemoryStore::new();
        let alloc = IdAllocator::new();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.mkv"), "").unwrap();
        catalog::catalog_medium(&store, &alloc, NewMedium::new(temp.path())).unwrap();

        for fragment in ["", "  "] {
            let err = find(&store, &Query::Path(fragment.into())).unwrap_err();
            assert!(matches!(err, DjError::Api(_)), "fragment {:?}", fragment);
        }
    }
}
