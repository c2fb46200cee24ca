use crate::allocator::IdAllocator;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DjError, Result};
use crate::model::{MediumId, MediumRecord};
use crate::store::CatalogStore;
use crate::tags::tag_set;
use tracing::info;

/// Replaces the tag set of record `id`. An empty `tags` clears it.
pub fn update_tags<S, T>(
    store: &S,
    allocator: &IdAllocator,
    id: MediumId,
    tags: &[T],
) -> Result<MediumRecord>
where
    S: CatalogStore,
    T: AsRef<str>,
{
    let tags = tag_set(tags)?;
    let record = allocator.mutate(store, move |db| {
        let record = db
            .find_mut(id)
            .ok_or_else(|| DjError::RecordNotFound(id.to_string()))?;
        record.tags = tags;
        Ok(record.clone())
    })?;
    info!(id = %record.id, tags = record.tags.len(), "updated tags");
    Ok(record)
}

pub fn run<S, T>(store: &S, allocator: &IdAllocator, id: MediumId, tags: &[T]) -> Result<CmdResult>
where
    S: CatalogStore,
    T: AsRef<str>,
{
    let record = update_tags(store, allocator, id, tags)?;
    let mut result = CmdResult::default();
    if record.tags.is_empty() {
        result.add_message(CmdMessage::success(format!("Cleared tags on {}", record.id)));
    } else {
        let joined: Vec<&str> = record.tags.iter().map(String::as_str).collect();
        result.add_message(CmdMessage::success(format!(
            "Tagged {}: {}",
            record.id,
            joined.join(", ")
        )));
    }
    Ok(result.with_affected_records(vec![record]))
}
