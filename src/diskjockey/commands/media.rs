use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DjError, Result};
use crate::scanner;
use crate::store::CatalogStore;
use std::path::PathBuf;

/// Names of the media currently mounted under the configured scan root.
pub fn candidates<S: CatalogStore>(store: &S) -> Result<Vec<String>> {
    let config = store.load_config()?;
    scanner::list_candidate_media(&config.scan_root)
}

pub fn run<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    let names = candidates(store)?;
    let mut result = CmdResult::default();
    if names.is_empty() {
        let config = store.load_config()?;
        result.add_message(CmdMessage::info(format!(
            "No media mounted under {}",
            config.scan_root.display()
        )));
    }
    Ok(result.with_candidates(names))
}

/// Resolves what the user asked to catalog into a root directory.
///
/// An existing directory path is taken as-is. Anything else is treated as the
/// name of a medium under the scan root. With no target, the only mounted
/// medium is picked; zero or several candidates is an error.
pub fn select_medium<S: CatalogStore>(store: &S, target: Option<&str>) -> Result<PathBuf> {
    if let Some(target) = target {
        let direct = PathBuf::from(target);
        if direct.is_dir() {
            return Ok(direct);
        }
        let config = store.load_config()?;
        let under_root = config.scan_root.join(target);
        if under_root.is_dir() {
            return Ok(under_root);
        }
        return Err(DjError::RootNotFound(direct));
    }

    let config = store.load_config()?;
    let mut names = scanner::list_candidate_media(&config.scan_root)?;
    match names.len() {
        0 => Err(DjError::Api(format!(
            "No media mounted under {}",
            config.scan_root.display()
        ))),
        1 => Ok(config.scan_root.join(names.remove(0))),
        _ => Err(DjError::Api(format!(
            "Several media are mounted, pick one: {}",
            names.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn store_with_root(root: &std::path::Path) -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .save_config(&CatalogConfig {
                scan_root: root.to_path_buf(),
            })
            .unwrap();
        store
    }

    #[test]
    fn lists_mounted_media() {
        let mounts = TempDir::new().unwrap();
        fs::create_dir(mounts.path().join("DVD_B")).unwrap();
        fs::create_dir(mounts.path().join("DVD_A")).unwrap();
        fs::write(mounts.path().join("stray.txt"), "").unwrap();

        let store = store_with_root(mounts.path());
        let result = run(&store).unwrap();
        assert_eq!(result.candidates, vec!["DVD_A", "DVD_B"]);
    }

    #[test]
    fn missing_scan_root_is_an_error() {
        let mounts = TempDir::new().unwrap();
        let store = store_with_root(&mounts.path().join("absent"));
        let err = run(&store).unwrap_err();
        assert!(matches!(err, DjError::ScanRootNotFound(_)));
        assert!(err.is_missing_root());
    }

    #[test]
    fn selects_single_mounted_medium() {
        let mounts = TempDir::new().unwrap();
        fs::create_dir(mounts.path().join("ONLY")).unwrap();
        let store = store_with_root(mounts.path());
        assert_eq!(
            select_medium(&store, None).unwrap(),
            mounts.path().join("ONLY")
        );
    }

    #[test]
    fn refuses_to_guess_between_several() {
        let mounts = TempDir::new().unwrap();
        fs::create_dir(mounts.path().join("A")).unwrap();
        fs::create_dir(mounts.path().join("B")).unwrap();
        let store = store_with_root(mounts.path());
        let err = select_medium(&store, None).unwrap_err();
        assert!(err.to_string().contains("A, B"));
    }

    #[test]
    fn nothing_mounted_is_an_error() {
        let mounts = TempDir::new().unwrap();
        let store = store_with_root(mounts.path());
        assert!(matches!(
            select_medium(&store, None),
            Err(DjError::Api(_))
        ));
    }

    #[test]
    fn target_may_be_a_path_or_a_name() {
        let mounts = TempDir::new().unwrap();
        fs::create_dir(mounts.path().join("NAMED")).unwrap();
        let elsewhere = TempDir::new().unwrap();
        let store = store_with_root(mounts.path());

        let by_path = elsewhere.path().to_string_lossy().into_owned();
        assert_eq!(
            select_medium(&store, Some(&by_path)).unwrap(),
            elsewhere.path()
        );
        assert_eq!(
            select_medium(&store, Some("NAMED")).unwrap(),
            mounts.path().join("NAMED")
        );
        assert!(matches!(
            select_medium(&store, Some("MISSING")),
            Err(DjError::RootNotFound(_))
        ));
    }
}
