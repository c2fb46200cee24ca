use crate::allocator::IdAllocator;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DjError, Result};
use crate::store::CatalogStore;
use tracing::info;

pub fn media_types<S: CatalogStore>(store: &S) -> Result<Vec<String>> {
    Ok(store.load_database()?.media_types.into_iter().collect())
}

/// Adds `name` to the media type vocabulary. Returns false if it was already known.
pub fn add_media_type<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    name: &str,
) -> Result<bool> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DjError::Api("Media type cannot be empty".to_string()));
    }
    let added = allocator.mutate(store, |db| Ok(db.media_types.insert(name.to_string())))?;
    if added {
        info!(media_type = name, "added media type");
    }
    Ok(added)
}

pub fn run_list<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_media_types(media_types(store)?))
}

pub fn run_add<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    name: &str,
) -> Result<CmdResult> {
    let added = add_media_type(store, allocator, name)?;
    let mut result = CmdResult::default().with_media_types(media_types(store)?);
    if added {
        result.add_message(CmdMessage::success(format!("Added media type {}", name.trim())));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Media type {} already exists",
            name.trim()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn defaults_are_cd_and_dvd() {
        let store = InMemoryStore::new();
        assert_eq!(media_types(&store).unwrap(), vec!["CD", "DVD"]);
    }

    #[test]
    fn add_is_persisted_once() {
        let store = InMemoryStore::new();
        let alloc = IdAllocator::new();
        assert!(add_media_type(&store, &alloc, "Blu-ray").unwrap());
        assert!(!add_media_type(&store, &alloc, " Blu-ray ").unwrap());
        assert_eq!(media_types(&store).unwrap(), vec!["Blu-ray", "CD", "DVD"]);

        let result = run_add(&store, &alloc, "CD").unwrap();
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Warning);
    }

    #[test]
    fn blank_type_is_rejected() {
        let store = InMemoryStore::new();
        assert!(add_media_type(&store, &IdAllocator::new(), "  ").is_err());
    }
}
