use crate::allocator::IdAllocator;
use crate::commands::{CmdMessage, CmdResult, NewMedium, ScanMode};
use crate::error::{DjError, Result};
use crate::model::{CatalogDate, MediumId, MediumRecord};
use crate::scanner;
use crate::store::CatalogStore;
use crate::tags::tag_set;
use std::path::Path;
use tracing::info;

/// Scans a medium and saves it as a new catalog record.
///
/// Order matters: input checks and the scan run first, then the id is
/// allocated and the record appended in one database write. A bad root, a bad
/// tag or a failed scan therefore never consumes an id.
pub fn catalog_medium<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    request: NewMedium,
) -> Result<MediumRecord> {
    let tags = tag_set(&request.tags)?;
    let label = match request.label {
        Some(label) if !label.trim().is_empty() => label,
        _ => default_label(&request.root),
    };

    let entries = scanner::scan(&request.root)?;
    let created_at = CatalogDate::today();
    let details = request.details;

    let record = allocator.allocate_with(store, move |db, id| {
        let record =
            MediumRecord::new(id, label, created_at, tags, entries)?.with_details(details);
        db.append(record.clone())?;
        Ok(record)
    })?;

    info!(
        id = %record.id,
        label = %record.label,
        entries = record.entries.len(),
        "cataloged medium"
    );
    Ok(record)
}

pub fn run<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    request: NewMedium,
) -> Result<CmdResult> {
    let record = catalog_medium(store, allocator, request)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cataloged {} as {} ({} entries)",
        record.label,
        record.id,
        record.entries.len()
    )));
    Ok(result.with_affected_records(vec![record]))
}

/// Scans `root` again for an existing record.
///
/// [`ScanMode::Reset`] replaces the entries; [`ScanMode::Append`] adds to them.
/// Id, label, date and tags are left alone.
pub fn rescan_medium<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    id: MediumId,
    root: &Path,
    mode: ScanMode,
) -> Result<MediumRecord> {
    // Fail fast before a potentially long scan.
    if store.load_database()?.find(id).is_none() {
        return Err(DjError::RecordNotFound(id.to_string()));
    }

    let fresh = scanner::scan(root)?;
    let record = allocator.mutate(store, move |db| {
        let record = db
            .find_mut(id)
            .ok_or_else(|| DjError::RecordNotFound(id.to_string()))?;
        match mode {
            ScanMode::Reset => record.entries = fresh,
            ScanMode::Append => record.entries.extend(fresh),
        }
        Ok(record.clone())
    })?;

    info!(id = %record.id, entries = record.entries.len(), ?mode, "rescanned medium");
    Ok(record)
}

pub fn run_rescan<S: CatalogStore>(
    store: &S,
    allocator: &IdAllocator,
    id: MediumId,
    root: &Path,
    mode: ScanMode,
) -> Result<CmdResult> {
    let record = rescan_medium(store, allocator, id, root, mode)?;
    let verb = match mode {
        ScanMode::Reset => "Rescanned",
        ScanMode::Append => "Appended scan to",
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} ({} entries)",
        verb,
        record.id,
        record.entries.len()
    )));
    Ok(result.with_affected_records(vec![record]))
}

/// Last path component of `root`, resolving `.`-style paths first.
fn default_label(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}
