//! Serialized view of the fasting state shared with the widget.
//!
//! The widget never talks to the repository. It reads this JSON file and
//! computes everything else from it, so a missing or unreadable file degrades
//! to the idle state instead of an error.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fast::{Fast, TargetInterval};

/// The parts of an active fast the widget needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastInfo {
    pub start_date: DateTime<Utc>,
    pub target_interval: TargetInterval,
}

impl FastInfo {
    /// Whole percentage points reached at `now`, rounded down.
    pub fn percent(&self, now: DateTime<Utc>) -> i64 {
        self.target_interval.percent_elapsed(self.start_date, now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum WidgetSnapshot {
    Active(FastInfo),
    Idle {
        #[serde(default)]
        last_fast_date: Option<DateTime<Utc>>,
    },
}

impl WidgetSnapshot {
    pub fn active(fast: &Fast) -> Self {
        WidgetSnapshot::Active(FastInfo {
            start_date: fast.start_date(),
            target_interval: fast.target_interval(),
        })
    }
}

impl Default for WidgetSnapshot {
    fn default() -> Self {
        WidgetSnapshot::Idle {
            last_fast_date: None,
        }
    }
}

/// Write the snapshot as JSON, replacing the file atomically.
///
/// # Errors
/// Returns an error if serialization or any filesystem step fails.
pub fn write_snapshot(path: &Path, snapshot: &WidgetSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "widget snapshot written");
    Ok(())
}

/// Read the snapshot, falling back to idle with no history on any failure.
pub fn load_snapshot(path: &Path) -> WidgetSnapshot {
    let loaded: Result<WidgetSnapshot, String> = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
    match loaded {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(path = %path.display(), "error loading widget data: {e}");
            WidgetSnapshot::default()
        }
    }
}
