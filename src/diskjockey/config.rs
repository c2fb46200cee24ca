use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCAN_ROOT_KEY: &str = "scan_root";

/// User settings, persisted as the config document by the catalog store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory under which removable media get mounted.
    pub scan_root: PathBuf,
}

/// Platform default mount point for removable media.
pub fn default_scan_root() -> PathBuf {
    if cfg!(target_os = "macos") {
        return PathBuf::from("/Volumes");
    }
    if cfg!(target_os = "linux") {
        let user = std::env::var("USER").or_else(|_| std::env::var("LOGNAME"));
        return match user {
            Ok(name) if !name.trim().is_empty() => PathBuf::from("/run/media").join(name),
            _ => PathBuf::from("/run/media"),
        };
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            scan_root: default_scan_root(),
        }
    }
}

impl CatalogConfig {
    pub fn keys() -> &'static [&'static str] {
        &[SCAN_ROOT_KEY]
    }

    /// Get a setting as its display string.
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            SCAN_ROOT_KEY => Some(self.scan_root.display().to_string()),
            _ => None,
        }
    }

    /// Set a setting from a string value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match normalize_key(key).as_str() {
            SCAN_ROOT_KEY => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("scan_root cannot be empty".to_string());
                }
                self.scan_root = PathBuf::from(value);
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// All settings as `(key, value)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::keys()
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

// Accept `scan-root` as well as `scan_root` on the command line.
fn normalize_key(key: &str) -> String {
    key.trim().replace('-', "_")
}
