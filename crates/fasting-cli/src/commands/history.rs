use clap::Subcommand;
use fasting_core::{group_by_month, Config, FastStats};

use super::{open_manager, CmdResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Completed fasts, most recent first
    List {
        /// Maximum number to list (defaults to history.limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Completed fasts grouped by month
    Groups,
    /// Aggregate statistics
    Stats,
}

pub fn run(action: HistoryAction) -> CmdResult {
    let manager = open_manager()?;
    let completed = manager.completed_fasts();

    match action {
        HistoryAction::List { limit } => {
            let limit = limit
                .or(Config::load_or_default().history.limit)
                .unwrap_or(completed.len());
            let shown = &completed[..limit.min(completed.len())];
            println!("{}", serde_json::to_string_pretty(shown)?);
        }
        HistoryAction::Groups => {
            let groups = group_by_month(completed);
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        HistoryAction::Stats => {
            let stats = FastStats::from_completed(completed);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
