//! Refresh schedule for a percentage-based progress display.
//!
//! Given a snapshot and the evaluation instant, produce the instants at which
//! the displayed whole percentage changes. Each step is one percentage point of
//! the target, so the schedule length depends only on how much progress is
//! left, never on the target's duration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::snapshot::{FastInfo, WidgetSnapshot};

/// Upper bound on entries: ticks 0 through 101.
pub const MAX_SCHEDULE_LEN: usize = 102;

/// When the consumer should next re-render, and with what data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: DateTime<Utc>,
    pub data: WidgetSnapshot,
}

/// Build the refresh schedule for `snapshot` as seen at `now`.
///
/// - Idle: one entry at `now`.
/// - Active at or past 100%: one entry at `now`; the display has saturated.
/// - Active below 100%: entries at `now + tick * target / 100` for every tick
///   up to one past completion, so the consumer always observes 100%.
///
/// A start date in the future counts as 0% progress.
pub fn refresh_schedule(snapshot: &WidgetSnapshot, now: DateTime<Utc>) -> Vec<ScheduleEntry> {
    match snapshot {
        WidgetSnapshot::Idle { .. } => vec![ScheduleEntry {
            date: now,
            data: *snapshot,
        }],
        WidgetSnapshot::Active(info) => active_schedule(info, now),
    }
}

fn active_schedule(info: &FastInfo, now: DateTime<Utc>) -> Vec<ScheduleEntry> {
    let data = WidgetSnapshot::Active(*info);
    let percent_interval = info.target_interval.percent_step();
    let current_percent = info.percent(now).max(0);

    if current_percent >= 100 {
        tracing::debug!(current_percent, "fast past its target, no further refreshes");
        return vec![ScheduleEntry { date: now, data }];
    }

    // One extra tick so the last entry lands above 100%.
    let required_ticks = (100 - current_percent) as i32 + 1;

    (0..=required_ticks)
        .map(|tick| ScheduleEntry {
            date: now + percent_interval * tick,
            data,
        })
        .collect()
}
