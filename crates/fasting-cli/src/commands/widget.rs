use chrono::{DateTime, Utc};
use clap::Subcommand;
use fasting_core::{load_snapshot, refresh_schedule, Config};

use super::{open_manager, sync_widget, CmdResult};

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Write the shared snapshot from the current state
    Snapshot,
    /// Print refresh entries computed from the shared snapshot
    Schedule {
        /// Evaluation time, RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

pub fn run(action: WidgetAction) -> CmdResult {
    let config = Config::load_or_default();

    match action {
        WidgetAction::Snapshot => {
            let manager = open_manager()?;
            sync_widget(&manager, &config);
            println!("{}", serde_json::to_string_pretty(&manager.widget_snapshot())?);
        }
        WidgetAction::Schedule { now } => {
            // Reads only the snapshot file, never the database.
            let snapshot = load_snapshot(&config.snapshot_path()?);
            let schedule = refresh_schedule(&snapshot, now.unwrap_or_else(Utc::now));
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
    }
    Ok(())
}
