//! # Path Scanner
//!
//! Walks a mounted medium and lists every file and directory below it,
//! relative to the medium root.
//!
//! Entries always start with `/` and use `/` as separator, whatever the host
//! platform, so `root = "/mnt/disk"` (or `"/mnt/disk/"`) and a file at
//! `/mnt/disk/dir/file` give `"/dir/file"`. The root itself is not listed.
//!
//! Traversal is depth-first with siblings sorted by name: a directory is
//! listed before its contents, and scanning an unchanged tree twice yields the
//! same sequence. Symlinks are listed but not followed.
//!
//! A scan is all-or-nothing. Any I/O error during the walk fails the whole
//! scan and nothing is appended.

use crate::error::{DjError, Result};
use std::fs;
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;

/// Scans `root` into a fresh listing.
///
/// This is the reset mode used when cataloging or re-cataloging a medium.
pub fn scan(root: &Path) -> Result<Vec<String>> {
    let mut listing = Vec::new();
    scan_into(root, &mut listing)?;
    Ok(listing)
}

/// Additive scan: appends the entries under `root` to `listing`.
///
/// Entries already in `listing` are not deduplicated. Returns the number of
/// entries appended.
pub fn scan_into(root: &Path, listing: &mut Vec<String>) -> Result<usize> {
    check_root(root)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DjError::ScanFailed {
            root: root.to_path_buf(),
            source,
        })?;
        found.push(relative_entry(root, entry.path()));
    }

    debug!(root = %root.display(), entries = found.len(), "scanned medium");
    let count = found.len();
    listing.extend(found);
    Ok(count)
}

/// Names of the directories directly under `scan_root`, sorted.
///
/// These are the media currently mounted and available for cataloging.
pub fn list_candidate_media(scan_root: &Path) -> Result<Vec<String>> {
    if !scan_root.is_dir() {
        return Err(DjError::ScanRootNotFound(scan_root.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(scan_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DjError::ScanFailed {
            root: scan_root.to_path_buf(),
            source,
        })?;
        // Mount points are sometimes symlinks; `is_dir` follows them.
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

fn check_root(root: &Path) -> Result<()> {
    if !root.is_dir() || fs::read_dir(root).is_err() {
        return Err(DjError::RootNotFound(root.to_path_buf()));
    }
    Ok(())
}

/// `/`-separated path of `path` below `root`, with a leading `/`.
fn relative_entry(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            out.push('/');
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("movies/old")).unwrap();
        fs::create_dir_all(root.join("music")).unwrap();
        fs::write(root.join("movies/a.mkv"), "").unwrap();
        fs::write(root.join("movies/old/b.avi"), "").unwrap();
        fs::write(root.join("readme.txt"), "").unwrap();
        temp
    }

    #[test]
    fn lists_files_and_directories_relative_to_root() {
        let temp = tree();
        let entries = scan(temp.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                "/movies",
                "/movies/a.mkv",
                "/movies/old",
                "/movies/old/b.avi",
                "/music",
                "/readme.txt",
            ]
        );
    }

    #[test]
    fn strips_root_prefix_exactly() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/b.txt"), "").unwrap();

        let entries = scan(temp.path()).unwrap();
        assert!(entries.contains(&"/a/b.txt".to_string()));

        let root_str = temp.path().to_string_lossy().to_string();
        assert!(entries.iter().all(|e| !e.starts_with(&root_str)));
    }

    #[test]
    fn trailing_separator_on_root_gives_same_listing() {
        let temp = tree();
        let plain = scan(temp.path()).unwrap();
        let mut with_slash = temp.path().as_os_str().to_owned();
        with_slash.push(std::path::MAIN_SEPARATOR_STR);
        let slashed = scan(&PathBuf::from(with_slash)).unwrap();
        assert_eq!(plain, slashed);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let temp = tree();
        assert_eq!(scan(temp.path()).unwrap(), scan(temp.path()).unwrap());
    }

    #[test]
    fn empty_directory_yields_empty_listing() {
        let temp = TempDir::new().unwrap();
        assert!(scan(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_root_not_found() {
        let temp = TempDir::new().unwrap();
        let err = scan(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, DjError::RootNotFound(_)));
    }

    #[test]
    fn file_root_is_root_not_found() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.iso");
        fs::write(&file, "").unwrap();
        assert!(matches!(scan(&file).unwrap_err(), DjError::RootNotFound(_)));
    }

    #[test]
    fn scan_into_appends_without_dedup() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("x"), "").unwrap();

        let mut listing = vec!["/x".to_string()];
        let added = scan_into(temp.path(), &mut listing).unwrap();
        assert_eq!(added, 1);
        assert_eq!(listing, vec!["/x", "/x"]);
    }

    #[test]
    fn failed_scan_leaves_listing_untouched() {
        let temp = TempDir::new().unwrap();
        let mut listing = vec!["/keep".to_string()];
        assert!(scan_into(&temp.path().join("gone"), &mut listing).is_err());
        assert_eq!(listing, vec!["/keep"]);
    }

    #[test]
    fn candidate_media_are_sorted_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("VACATION_2019")).unwrap();
        fs::create_dir(temp.path().join("BACKUP")).unwrap();
        fs::write(temp.path().join("stray.txt"), "").unwrap();

        let media = list_candidate_media(temp.path()).unwrap();
        assert_eq!(media, vec!["BACKUP", "VACATION_2019"]);
    }

    #[test]
    fn missing_scan_root_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = list_candidate_media(&temp.path().join("media")).unwrap_err();
        assert!(matches!(err, DjError::ScanRootNotFound(_)));
    }
}
