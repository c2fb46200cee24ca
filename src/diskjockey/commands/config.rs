use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CatalogStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<S: CatalogStore>(store: &S, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = store.load_config()?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = store.load_config()?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = store.load_config()?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            store.save_config(&config)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    #[test]
    fn set_persists_scan_root() {
        let store = InMemoryStore::new();
        let result = run(
            &store,
            ConfigAction::Set("scan_root".into(), "/mnt/discs".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(
            store.load_config().unwrap().scan_root,
            PathBuf::from("/mnt/discs")
        );

        let shown = run(&store, ConfigAction::ShowKey("scan_root".into())).unwrap();
        assert_eq!(shown.messages[0].content, "/mnt/discs");
    }

    #[test]
    fn unknown_key_reports_error_without_saving() {
        let store = InMemoryStore::new();
        let before = store.load_config().unwrap();
        let result = run(&store, ConfigAction::Set("nope".into(), "x".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(store.load_config().unwrap(), before);

        let shown = run(&store, ConfigAction::ShowKey("nope".into())).unwrap();
        assert_eq!(shown.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn show_all_returns_config() {
        let store = InMemoryStore::new();
        let result = run(&store, ConfigAction::ShowAll).unwrap();
        assert!(result.config.is_some());
    }
}
