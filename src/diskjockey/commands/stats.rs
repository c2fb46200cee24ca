use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::{self, CatalogStats};
use crate::store::CatalogStore;

pub fn catalog_stats<S: CatalogStore>(store: &S) -> Result<CatalogStats> {
    Ok(query::stats(&store.load_database()?))
}

pub fn run<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(catalog_stats(store)?))
}
