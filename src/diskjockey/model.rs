use crate::error::{DjError, Result};
use crate::tags::validate_tag;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Minimum rendered width of a medium id ("001").
pub const ID_WIDTH: usize = 3;

/// On-disk date format: day granularity, independent of the host locale.
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Catalog identifier of a medium.
///
/// Stored and displayed as a zero-padded decimal string of at least
/// [`ID_WIDTH`] digits. Parsing accepts any all-digit string, so `"7"` and
/// `"007"` name the same medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediumId(u64);

impl MediumId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MediumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = ID_WIDTH)
    }
}

impl FromStr for MediumId {
    type Err = DjError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DjError::Api(format!("Invalid medium id: {:?}", s)));
        }
        s.parse::<u64>()
            .map(MediumId)
            .map_err(|_| DjError::Api(format!("Medium id out of range: {}", s)))
    }
}

impl TryFrom<String> for MediumId {
    type Error = DjError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MediumId> for String {
    fn from(id: MediumId) -> Self {
        id.to_string()
    }
}

/// The day a medium was cataloged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogDate(NaiveDate);

impl CatalogDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in the host's local time zone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CatalogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CatalogDate {
    type Err = DjError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(CatalogDate)
            .map_err(|e| DjError::Api(format!("Invalid catalog date {:?}: {}", s, e)))
    }
}

impl TryFrom<String> for CatalogDate {
    type Error = DjError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CatalogDate> for String {
    fn from(date: CatalogDate) -> Self {
        date.to_string()
    }
}

/// Returns today's date in the catalog's storage format (`MM/DD/YY`).
pub fn today() -> String {
    CatalogDate::today().to_string()
}

/// Descriptive fields the catalog carries but never interprets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediumDetails {
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub storage_location: Option<String>,
    /// Declared capacity in bytes.
    #[serde(default)]
    pub capacity: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediumRecord {
    pub id: MediumId,
    pub label: String,
    pub created_at: CatalogDate,
    #[serde(flatten)]
    pub details: MediumDetails,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Root-relative paths in traversal order.
    #[serde(default)]
    pub entries: Vec<String>,
}

impl MediumRecord {
    pub fn new(
        id: MediumId,
        label: impl Into<String>,
        created_at: CatalogDate,
        tags: BTreeSet<String>,
        entries: Vec<String>,
    ) -> Result<Self> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(DjError::Api("Medium label cannot be empty".to_string()));
        }
        for tag in &tags {
            validate_tag(tag).map_err(|e| DjError::InvalidTag {
                tag: tag.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(Self {
            id,
            label,
            created_at,
            details: MediumDetails::default(),
            tags,
            entries,
        })
    }

    pub fn with_details(mut self, details: MediumDetails) -> Self {
        self.details = details;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True if any entry equals `fragment` or ends with it. An empty fragment
    /// matches nothing.
    pub fn contains_path(&self, fragment: &str) -> bool {
        !fragment.is_empty()
            && self
                .entries
                .iter()
                .any(|entry| entry == fragment || entry.ends_with(fragment))
    }
}

fn default_media_types() -> BTreeSet<String> {
    ["CD", "DVD"].iter().map(|s| s.to_string()).collect()
}

/// The whole catalog: the allocation counter plus every medium record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDatabase {
    /// Required on disk: a lost counter would hand out old ids again.
    pub last_used_id: u64,
    #[serde(default = "default_media_types")]
    pub media_types: BTreeSet<String>,
    /// Insertion order is the only ordering guarantee.
    pub disks: Vec<MediumRecord>,
}

impl Default for CatalogDatabase {
    fn default() -> Self {
        Self {
            last_used_id: 0,
            media_types: default_media_types(),
            disks: Vec::new(),
        }
    }
}

impl CatalogDatabase {
    /// Advances `last_used_id` by one and returns the new id.
    ///
    /// Only mutates memory; callers persist the database afterwards.
    pub fn bump_id(&mut self) -> Result<MediumId> {
        let next = self
            .last_used_id
            .checked_add(1)
            .ok_or_else(|| DjError::Api("Medium id space exhausted".to_string()))?;
        self.last_used_id = next;
        Ok(MediumId(next))
    }

    pub fn find(&self, id: MediumId) -> Option<&MediumRecord> {
        self.disks.iter().find(|r| r.id == id)
    }

    pub fn find_mut(&mut self, id: MediumId) -> Option<&mut MediumRecord> {
        self.disks.iter_mut().find(|r| r.id == id)
    }

    /// Appends a record, refusing ids that were never issued or are taken.
    pub fn append(&mut self, record: MediumRecord) -> Result<()> {
        if record.id.value() > self.last_used_id {
            return Err(DjError::Api(format!(
                "Medium id {} was never allocated (last used: {})",
                record.id, self.last_used_id
            )));
        }
        if self.find(record.id).is_some() {
            return Err(DjError::Api(format!("Medium id {} is already in use", record.id)));
        }
        self.disks.push(record);
        Ok(())
    }

    /// Checks the invariants a persisted catalog must satisfy.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::with_capacity(self.disks.len());
        for record in &self.disks {
            if !seen.insert(record.id) {
                return Err(format!("duplicate medium id {}", record.id));
            }
            if record.id.value() > self.last_used_id {
                return Err(format!(
                    "medium id {} exceeds last_used_id {}",
                    record.id, self.last_used_id
                ));
            }
        }
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.disks.iter().map(|r| r.entries.len()).sum()
    }
}
