use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DjError {
    #[error("Store unavailable ({}): {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Store corrupt ({}): {reason}", .path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("Medium root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Scan root not found: {}", .0.display())]
    ScanRootNotFound(PathBuf),

    #[error("Scan failed under {}: {source}", .root.display())]
    ScanFailed {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl DjError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DjError::StoreUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DjError::StoreCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a missing medium or scan root.
    pub fn is_missing_root(&self) -> bool {
        matches!(self, DjError::RootNotFound(_) | DjError::ScanRootNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DjError>;
