//! The fast entity.
//!
//! A [`Fast`] is one fasting attempt. Its start date and target interval are
//! fixed at creation; the only lifecycle transition is `Active -> Completed`,
//! which happens at most once.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Longest target accepted: one leap year.
pub const MAX_TARGET_SECS: u64 = 366 * 24 * 60 * 60;

/// Repository-assigned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FastId(pub i64);

impl std::fmt::Display for FastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long the user intends to fast, in whole seconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TargetInterval {
    secs: u64,
}

impl TargetInterval {
    /// # Errors
    /// Returns `InvalidArgument` if `secs` is not positive or exceeds
    /// [`MAX_TARGET_SECS`].
    pub fn from_secs(secs: i64) -> Result<Self> {
        if secs <= 0 {
            tracing::warn!(secs, "rejecting non-positive target interval");
            return Err(CoreError::invalid_argument(
                "target_interval",
                format!("must be positive, got {secs}s"),
            ));
        }
        let secs = secs as u64;
        if secs > MAX_TARGET_SECS {
            tracing::warn!(secs, "rejecting target interval longer than a year");
            return Err(CoreError::invalid_argument(
                "target_interval",
                format!("must be at most {MAX_TARGET_SECS}s, got {secs}s"),
            ));
        }
        Ok(Self { secs })
    }

    pub fn from_hours(hours: u32) -> Result<Self> {
        Self::from_secs(i64::from(hours) * 3600)
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.secs as i64)
    }

    /// Duration of one percentage point of the target.
    ///
    /// Exact: a whole second is 10^9 ns, so dividing by 100 never truncates.
    pub fn percent_step(&self) -> Duration {
        Duration::nanoseconds(self.secs as i64 * 10_000_000)
    }

    /// Whole percentage points of the target elapsed between `start` and `now`,
    /// rounded down. Negative when `start` is in the future.
    pub fn percent_elapsed(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let elapsed_ms = (now - start).num_milliseconds();
        let target_ms = self.secs as i64 * 1000;
        elapsed_ms.saturating_mul(100).div_euclid(target_ms)
    }
}

impl TryFrom<i64> for TargetInterval {
    type Error = CoreError;

    fn try_from(secs: i64) -> Result<Self> {
        Self::from_secs(secs)
    }
}

impl From<TargetInterval> for i64 {
    fn from(target: TargetInterval) -> Self {
        target.secs as i64
    }
}

/// Whether a fast is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FastStatus {
    Active,
    Completed { end_date: DateTime<Utc> },
}

/// Self-reported mood attached to a fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
    Awful = 1,
    Bad = 2,
    Okay = 3,
    Good = 4,
    Great = 5,
}

impl Mood {
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Awful => "😫",
            Mood::Bad => "🙁",
            Mood::Okay => "😐",
            Mood::Good => "🙂",
            Mood::Great => "😄",
        }
    }
}

impl TryFrom<u8> for Mood {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Mood::Awful),
            2 => Ok(Mood::Bad),
            3 => Ok(Mood::Okay),
            4 => Ok(Mood::Good),
            5 => Ok(Mood::Great),
            other => Err(CoreError::invalid_argument(
                "mood",
                format!("expected 1-5, got {other}"),
            )),
        }
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> Self {
        mood as u8
    }
}

/// One fasting attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fast {
    id: FastId,
    start_date: DateTime<Utc>,
    #[serde(flatten)]
    status: FastStatus,
    target_interval: TargetInterval,
    #[serde(default)]
    mood: Option<Mood>,
}

impl Fast {
    /// Rebuild a fast from stored fields. Used by repository implementations.
    pub fn from_parts(
        id: FastId,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        target_interval: TargetInterval,
        mood: Option<Mood>,
    ) -> Self {
        let status = match end_date {
            Some(end_date) => FastStatus::Completed { end_date },
            None => FastStatus::Active,
        };
        tracing::trace!(%id, "fast entity created");
        Self {
            id,
            start_date,
            status,
            target_interval,
            mood,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> FastId {
        self.id
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn status(&self) -> FastStatus {
        self.status
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        match self.status {
            FastStatus::Active => None,
            FastStatus::Completed { end_date } => Some(end_date),
        }
    }

    pub fn target_interval(&self) -> TargetInterval {
        self.target_interval
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn is_active(&self) -> bool {
        self.status == FastStatus::Active
    }

    /// Time fasted so far, or in total once completed.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.end_date().unwrap_or(now) - self.start_date
    }

    /// Fraction of the target reached. Not clamped; exceeds 1.0 past the goal.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed(now).num_milliseconds() as f64
            / (self.target_interval.as_secs() as f64 * 1000.0)
    }

    /// Whole percentage points of the target reached, rounded down.
    pub fn percent(&self, now: DateTime<Utc>) -> i64 {
        self.target_interval
            .percent_elapsed(self.start_date, self.end_date().unwrap_or(now))
    }

    /// `true` if a completed fast lasted at least its target.
    pub fn goal_met(&self) -> bool {
        match self.status {
            FastStatus::Active => false,
            FastStatus::Completed { end_date } => {
                end_date - self.start_date >= self.target_interval.as_duration()
            }
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// One-way `Active -> Completed`. Callers check `is_active()` first.
    pub(crate) fn complete(&mut self, end_date: DateTime<Utc>) {
        debug_assert!(self.is_active());
        self.status = FastStatus::Completed { end_date };
    }

    pub(crate) fn set_mood(&mut self, mood: Option<Mood>) {
        self.mood = mood;
    }
}
