//! # Command Layer
//!
//! The catalog service: each operation lives in its own submodule as plain
//! functions over a [`CatalogStore`](crate::store::CatalogStore).
//!
//! Most modules expose two levels:
//! - a typed function (`catalog_medium`, `update_tags`, ...) returning domain
//!   values, which is the stable library contract;
//! - a `run` wrapper returning [`CmdResult`], which adds the user-facing
//!   messages the CLI prints.
//!
//! Commands never print, prompt or exit. Errors go back to the caller as
//! [`DjError`](crate::error::DjError).
//!
//! ## Command Modules
//!
//! - [`catalog`]: catalog a new medium, rescan an existing one
//! - [`tags`]: replace a medium's tags
//! - [`search`]: query by tag, label or contained path
//! - [`show`]: list records, fetch one by id
//! - [`stats`]: catalog totals
//! - [`media`]: discover mounted media under the scan root
//! - [`types`]: the media type vocabulary
//! - [`config`]: read and change settings

use crate::config::CatalogConfig;
use crate::model::{MediumDetails, MediumRecord};
use crate::query::CatalogStats;
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod media;
pub mod search;
pub mod show;
pub mod stats;
pub mod tags;
pub mod types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created or modified by the command.
    pub affected_records: Vec<MediumRecord>,
    /// Records to display.
    pub listed_records: Vec<MediumRecord>,
    /// Mounted media names under the scan root.
    pub candidates: Vec<String>,
    pub media_types: Vec<String>,
    pub stats: Option<CatalogStats>,
    pub config: Option<CatalogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<MediumRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<MediumRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_media_types(mut self, types: Vec<String>) -> Self {
        self.media_types = types;
        self
    }

    pub fn with_stats(mut self, stats: CatalogStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Everything needed to catalog a medium.
#[derive(Debug, Clone)]
pub struct NewMedium {
    pub root: PathBuf,
    /// Defaults to the last component of `root`.
    pub label: Option<String>,
    pub tags: Vec<String>,
    pub details: MediumDetails,
}

impl NewMedium {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            label: None,
            tags: Vec::new(),
            details: MediumDetails::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_details(mut self, details: MediumDetails) -> Self {
        self.details = details;
        self
    }
}

/// How a rescan treats the entries already on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Replace the entries with the fresh listing.
    Reset,
    /// Append the fresh listing; existing entries are kept, duplicates too.
    Append,
}
