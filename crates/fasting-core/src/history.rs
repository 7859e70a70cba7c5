//! Completed-fast history: month grouping for timeline display and aggregate
//! statistics.

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::fast::Fast;

/// Completed fasts that ended in the same calendar month (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastGroup {
    /// e.g. "October 2026"
    pub title: String,
    pub fasts: Vec<Fast>,
}

/// Group completed fasts by the month they ended in.
///
/// Expects most-recent-first input (as returned by the repository) and keeps
/// that order both across and within groups. Active fasts are skipped.
pub fn group_by_month(completed: &[Fast]) -> Vec<FastGroup> {
    let mut groups: Vec<((i32, u32), FastGroup)> = Vec::new();

    for fast in completed {
        let Some(end) = fast.end_date() else {
            continue;
        };
        let key = (end.year(), end.month());
        if let Some((last_key, group)) = groups.last_mut() {
            if *last_key == key {
                group.fasts.push(fast.clone());
                continue;
            }
        }
        groups.push((
            key,
            FastGroup {
                title: end.format("%B %Y").to_string(),
                fasts: vec![fast.clone()],
            },
        ));
    }

    groups.into_iter().map(|(_, group)| group).collect()
}

/// Aggregate statistics over completed fasts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FastStats {
    pub total_fasts: u64,
    pub goals_met: u64,
    pub total_fasted_secs: i64,
    pub longest_fast_secs: i64,
    pub average_fast_secs: i64,
}

impl FastStats {
    pub fn from_completed(completed: &[Fast]) -> Self {
        let mut stats = FastStats::default();
        for fast in completed {
            let Some(end) = fast.end_date() else {
                continue;
            };
            let secs = (end - fast.start_date()).num_seconds();
            stats.total_fasts += 1;
            stats.total_fasted_secs += secs;
            stats.longest_fast_secs = stats.longest_fast_secs.max(secs);
            if fast.goal_met() {
                stats.goals_met += 1;
            }
        }
        if stats.total_fasts > 0 {
            stats.average_fast_secs = stats.total_fasted_secs / stats.total_fasts as i64;
        }
        stats
    }

    pub fn total_fasted(&self) -> Duration {
        Duration::seconds(self.total_fasted_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fast::{FastId, TargetInterval};
    use chrono::{DateTime, TimeZone, Utc};

    fn completed(id: i64, end: DateTime<Utc>, hours: i64) -> Fast {
        Fast::from_parts(
            FastId(id),
            end - Duration::hours(hours),
            Some(end),
            TargetInterval::from_hours(16).unwrap(),
            None,
        )
    }

    #[test]
    fn groups_by_end_month() {
        let fasts = vec![
            completed(3, Utc.with_ymd_and_hms(2026, 10, 3, 12, 0, 0).unwrap(), 16),
            completed(2, Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(), 16),
            completed(1, Utc.with_ymd_and_hms(2026, 9, 29, 12, 0, 0).unwrap(), 16),
        ];
        let groups = group_by_month(&fasts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "October 2026");
        assert_eq!(groups[0].fasts.len(), 2);
        assert_eq!(groups[1].title, "September 2026");
        assert_eq!(groups[1].fasts[0].id(), FastId(1));
    }

    #[test]
    fn same_month_different_year_is_separate() {
        let fasts = vec![
            completed(2, Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap(), 16),
            completed(1, Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap(), 16),
        ];
        let titles: Vec<_> = group_by_month(&fasts).into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["January 2026", "January 2025"]);
    }

    #[test]
    fn empty_history() {
        assert!(group_by_month(&[]).is_empty());
        assert_eq!(FastStats::from_completed(&[]), FastStats::default());
    }

    #[test]
    fn stats_over_completed() {
        let end = Utc.with_ymd_and_hms(2026, 10, 3, 12, 0, 0).unwrap();
        let fasts = vec![completed(1, end, 18), completed(2, end, 12)];
        let stats = FastStats::from_completed(&fasts);
        assert_eq!(stats.total_fasts, 2);
        assert_eq!(stats.goals_met, 1);
        assert_eq!(stats.longest_fast_secs, 18 * 3600);
        assert_eq!(stats.average_fast_secs, 15 * 3600);
        assert_eq!(stats.total_fasted(), Duration::hours(30));
    }
}
