pub mod config;
pub mod fast;
pub mod history;
pub mod widget;

use fasting_core::{Config, Database, FastManager};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the default database and load the manager over it.
pub fn open_manager() -> Result<FastManager<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(FastManager::new(db)?)
}

/// Rewrite the widget snapshot after a change. Failure only warns: the fast
/// itself has already been persisted.
pub fn sync_widget(manager: &FastManager<Database>, config: &Config) {
    let result = config
        .snapshot_path()
        .map_err(fasting_core::CoreError::from)
        .and_then(|path| fasting_core::write_snapshot(&path, &manager.widget_snapshot()));
    if let Err(e) = result {
        tracing::warn!("failed to update widget snapshot: {e}");
    }
}
