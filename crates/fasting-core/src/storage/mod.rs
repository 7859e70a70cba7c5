mod config;
pub mod database;
mod memory;
pub mod migrations;

pub use config::{Config, FastConfig, HistoryConfig, WidgetConfig};
pub use database::Database;
pub use memory::MemoryRepository;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::fast::{Fast, FastId, TargetInterval};

/// Durable storage for fasts.
///
/// Implementations own identifiers and persistence; they do not enforce the
/// lifecycle rules, which live in [`crate::FastManager`].
pub trait FastRepository {
    /// Persist a new fast and return it with its assigned id.
    fn create(
        &mut self,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        target_interval: TargetInterval,
    ) -> Result<Fast, StorageError>;

    fn get(&self, id: FastId) -> Result<Option<Fast>, StorageError>;

    /// Persist the mutable fields (end date, mood) of an existing fast.
    fn update(&mut self, fast: &Fast) -> Result<(), StorageError>;

    fn delete(&mut self, id: FastId) -> Result<(), StorageError>;

    /// All fasts with an end date, most recently ended first.
    fn list_completed(&self) -> Result<Vec<Fast>, StorageError>;

    /// The fast without an end date, if any.
    fn active(&self) -> Result<Option<Fast>, StorageError>;
}

/// Returns `~/.config/fasting[-dev]/` based on FASTING_ENV.
///
/// Set FASTING_ENV=dev to use development data directory, or
/// FASTING_DATA_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FASTING_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FASTING_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fasting-dev")
            } else {
                base_dir.join("fasting")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
