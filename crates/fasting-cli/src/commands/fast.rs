use chrono::{DateTime, Utc};
use clap::Subcommand;
use fasting_core::{Config, FastId, Mood, TargetInterval};

use super::{open_manager, sync_widget, CmdResult};

#[derive(Subcommand)]
pub enum FastAction {
    /// Start a fast, or record a completed one with --end
    Start {
        /// Target in hours (defaults to fast.default_target_hours)
        #[arg(long)]
        hours: Option<u32>,
        /// Start time, RFC 3339 (defaults to now)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// End time, RFC 3339, for a fast that already finished
        #[arg(long)]
        end: Option<DateTime<Utc>>,
    },
    /// End the current fast
    End {
        /// End time, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Delete a fast by id
    Delete {
        id: i64,
    },
    /// Print the current fast and its progress as JSON
    Status,
    /// Set a fast's mood (1-5) or "clear" it
    Mood {
        id: i64,
        mood: String,
    },
}

fn parse_mood(value: &str) -> Result<Option<Mood>, Box<dyn std::error::Error>> {
    if value == "clear" {
        return Ok(None);
    }
    let n: u8 = value
        .parse()
        .map_err(|_| format!("mood must be 1-5 or 'clear', got '{value}'"))?;
    Ok(Some(Mood::try_from(n)?))
}

pub fn run(action: FastAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut manager = open_manager()?;

    match action {
        FastAction::Start { hours, start, end } => {
            let target = match hours {
                Some(h) => TargetInterval::from_hours(h)?,
                None => config.default_target()?,
            };
            let start = start.unwrap_or_else(Utc::now);
            let fast = manager.start_fast(start, end, target)?;
            println!("{}", serde_json::to_string_pretty(&fast)?);
        }
        FastAction::End { at } => {
            let current = manager
                .current_fast()
                .cloned()
                .ok_or("no active fast")?;
            let fast = manager.end_fast(&current, at.unwrap_or_else(Utc::now))?;
            println!("{}", serde_json::to_string_pretty(&fast)?);
        }
        FastAction::Delete { id } => {
            let fast = manager
                .fast(FastId(id))?
                .ok_or_else(|| format!("fast {id} not found"))?;
            manager.delete_fast(&fast)?;
            println!("fast {id} deleted");
        }
        FastAction::Status => {
            let now = Utc::now();
            let status = match manager.current_fast() {
                Some(fast) => serde_json::json!({
                    "fast": fast,
                    "percent": fast.percent(now),
                    "progress": fast.progress(now),
                    "elapsed_secs": fast.elapsed(now).num_seconds(),
                    "goal_at": fast.start_date() + fast.target_interval().as_duration(),
                }),
                None => serde_json::json!({
                    "fast": null,
                    "last_fast_date": manager.completed_fasts().first().and_then(|f| f.end_date()),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        FastAction::Mood { id, mood } => {
            let mood = parse_mood(&mood)?;
            let fast = manager
                .fast(FastId(id))?
                .ok_or_else(|| format!("fast {id} not found"))?;
            let fast = manager.set_mood(&fast, mood)?;
            println!("{}", serde_json::to_string_pretty(&fast)?);
        }
    }

    sync_widget(&manager, &config);
    Ok(())
}
