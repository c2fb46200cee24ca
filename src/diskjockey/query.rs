//! # Query Engine
//!
//! Read-only lookups over the catalog. Every query scans all records and
//! returns matches in catalog insertion order. No match is an empty result,
//! not an error.

use crate::model::{CatalogDatabase, MediumRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// What to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Records carrying exactly this tag (case-sensitive).
    Tag(String),
    /// Records whose label contains this text (case-insensitive).
    Label(String),
    /// Records with an entry equal to, or ending with, this path fragment.
    Path(String),
}

impl Query {
    pub fn matches(&self, record: &MediumRecord) -> bool {
        match self {
            Query::Tag(tag) => record.has_tag(tag),
            Query::Label(text) => record.label.to_lowercase().contains(&text.to_lowercase()),
            Query::Path(fragment) => record.contains_path(fragment),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Query::Tag(_) => "tag",
            Query::Label(_) => "label",
            Query::Path(_) => "path",
        }
    }

    pub fn term(&self) -> &str {
        match self {
            Query::Tag(s) | Query::Label(s) | Query::Path(s) => s,
        }
    }
}

/// All records matching `query`, in insertion order.
pub fn run<'a>(records: &'a [MediumRecord], query: &Query) -> Vec<&'a MediumRecord> {
    records.iter().filter(|r| query.matches(r)).collect()
}

pub fn by_tag<'a>(records: &'a [MediumRecord], tag: &str) -> Vec<&'a MediumRecord> {
    run(records, &Query::Tag(tag.to_string()))
}

pub fn by_label<'a>(records: &'a [MediumRecord], text: &str) -> Vec<&'a MediumRecord> {
    run(records, &Query::Label(text.to_string()))
}

pub fn by_path<'a>(records: &'a [MediumRecord], fragment: &str) -> Vec<&'a MediumRecord> {
    run(records, &Query::Path(fragment.to_string()))
}

/// Totals over the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub record_count: usize,
    pub entry_count: usize,
    /// Tag → number of records carrying it.
    pub tag_frequency: BTreeMap<String, usize>,
    pub last_used_id: u64,
}

pub fn stats(db: &CatalogDatabase) -> CatalogStats {
    let mut tag_frequency = BTreeMap::new();
    for record in &db.disks {
        for tag in &record.tags {
            *tag_frequency.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    CatalogStats {
        record_count: db.disks.len(),
        entry_count: db.entry_count(),
        tag_frequency,
        last_used_id: db.last_used_id,
    }
}
