use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DjError, Result};
use crate::model::{MediumId, MediumRecord};
use crate::store::CatalogStore;

pub fn get_record<S: CatalogStore>(store: &S, id: MediumId) -> Result<MediumRecord> {
    store
        .load_database()?
        .find(id)
        .cloned()
        .ok_or_else(|| DjError::RecordNotFound(id.to_string()))
}

/// Every record, in insertion order.
pub fn list_records<S: CatalogStore>(store: &S) -> Result<Vec<MediumRecord>> {
    Ok(store.load_database()?.disks)
}

pub fn run_list<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    let records = list_records(store)?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("The catalog is empty."));
    }
    Ok(result.with_listed_records(records))
}

pub fn run_show<S: CatalogStore>(store: &S, ids: &[MediumId]) -> Result<CmdResult> {
    let records = ids
        .iter()
        .map(|id| get_record(store, *id))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_records(records))
}
