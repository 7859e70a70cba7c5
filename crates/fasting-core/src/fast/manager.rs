//! Fast lifecycle manager.
//!
//! [`FastManager`] is the single writer of the "current fast" reference and of
//! the in-memory list of completed fasts. The repository stays authoritative;
//! the manager re-reads the completed list after every mutation instead of
//! merging changes into it.
//!
//! ## State Transitions
//!
//! ```text
//! (none) -> Active -> Completed -> (deleted)
//! ```
//!
//! Every operation validates its arguments before touching the repository and
//! only updates in-memory state after all repository calls have succeeded.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::model::{Fast, FastId, Mood, TargetInterval};
use crate::error::{CoreError, Result, StorageError};
use crate::storage::FastRepository;
use crate::widget::WidgetSnapshot;

pub struct FastManager<R: FastRepository> {
    repo: R,
    current_fast: Option<Fast>,
    /// Most recent first.
    completed_fasts: Vec<Fast>,
}

impl<R: FastRepository> FastManager<R> {
    /// Create a manager over `repo`, loading the active fast and the
    /// completed history.
    ///
    /// # Errors
    /// Returns a storage error if either read fails.
    pub fn new(repo: R) -> Result<Self> {
        let current_fast = repo.active()?;
        let completed_fasts = repo.list_completed()?;
        debug!(
            active = current_fast.is_some(),
            completed = completed_fasts.len(),
            "fast manager loaded"
        );
        Ok(Self {
            repo,
            current_fast,
            completed_fasts,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_fast(&self) -> Option<&Fast> {
        self.current_fast.as_ref()
    }

    pub fn completed_fasts(&self) -> &[Fast] {
        &self.completed_fasts
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Look up any fast by id, active or completed.
    pub fn fast(&self, id: FastId) -> Result<Option<Fast>> {
        Ok(self.repo.get(id)?)
    }

    /// The state a widget needs to render and schedule its refreshes.
    pub fn widget_snapshot(&self) -> WidgetSnapshot {
        match &self.current_fast {
            Some(fast) => WidgetSnapshot::active(fast),
            None => WidgetSnapshot::Idle {
                last_fast_date: self.completed_fasts.first().and_then(Fast::end_date),
            },
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create and persist a fast.
    ///
    /// With `end_date == None` the fast becomes the current fast. With an end
    /// date it is a historical record and only the completed list is reloaded.
    ///
    /// # Errors
    /// - `InvalidArgument` if `end_date` precedes `start_date`.
    /// - `InvalidState` if an ongoing fast is requested while one is active.
    /// - Storage errors from the repository.
    pub fn start_fast(
        &mut self,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        target_interval: TargetInterval,
    ) -> Result<Fast> {
        info!(%start_date, ?end_date, target_secs = target_interval.as_secs(), "starting a new fast");

        if let Some(end) = end_date {
            if end < start_date {
                warn!(%start_date, %end, "rejecting fast that ends before it starts");
                return Err(CoreError::invalid_argument(
                    "end_date",
                    format!("{end} is before start date {start_date}"),
                ));
            }
        } else {
            match self.repo.active()? {
                Some(active) => {
                    warn!(id = %active.id(), "attempting to start a fast while another is active");
                    let id = active.id();
                    self.current_fast = Some(active);
                    return Err(CoreError::InvalidState(format!(
                        "fast {id} is still active"
                    )));
                }
                None => {
                    if let Some(stale) = self.current_fast.take() {
                        debug!(id = %stale.id(), "current fast is no longer active in storage, dropping it");
                    }
                }
            }
        }

        let fast = self.repo.create(start_date, end_date, target_interval)?;

        if fast.is_active() {
            debug!(id = %fast.id(), "new fast has no end date, assigning as current fast");
            self.current_fast = Some(fast.clone());
        } else {
            debug!(id = %fast.id(), "new fast has an end date, reloading completed fasts");
            self.load_completed_fasts()?;
        }

        Ok(fast)
    }

    /// End an ongoing fast and clear the current fast.
    ///
    /// The stored record is re-read so that a stale copy of an already-ended
    /// fast is rejected too. Returns the completed fast.
    ///
    /// # Errors
    /// - `InvalidState` if the fast already has an end date.
    /// - `InvalidArgument` if `end_date` precedes the start date.
    /// - Storage errors, including `NotFound` for an unknown id.
    pub fn end_fast(&mut self, fast: &Fast, end_date: DateTime<Utc>) -> Result<Fast> {
        info!(id = %fast.id(), %end_date, "ending fast");

        if !fast.is_active() {
            warn!(id = %fast.id(), "attempting to end a fast with existing end date");
            return Err(already_ended(fast.id()));
        }
        if end_date < fast.start_date() {
            warn!(id = %fast.id(), %end_date, "rejecting end date before start date");
            return Err(CoreError::invalid_argument(
                "end_date",
                format!("{end_date} is before start date {}", fast.start_date()),
            ));
        }

        let mut stored = self
            .repo
            .get(fast.id())?
            .ok_or(StorageError::NotFound { id: fast.id().0 })?;
        if !stored.is_active() {
            warn!(id = %fast.id(), "stored fast already has an end date");
            return Err(already_ended(fast.id()));
        }

        stored.complete(end_date);
        self.repo.update(&stored)?;
        let completed = self.repo.list_completed()?;

        self.completed_fasts = completed;
        self.current_fast = None;
        Ok(stored)
    }

    /// Remove a fast from storage, clearing the current fast if it was the one
    /// deleted.
    ///
    /// # Errors
    /// Storage errors from the repository, including `NotFound`.
    pub fn delete_fast(&mut self, fast: &Fast) -> Result<()> {
        info!(id = %fast.id(), "deleting fast");

        self.repo.delete(fast.id())?;
        let completed = self.repo.list_completed()?;

        if self.current_fast.as_ref().map(Fast::id) == Some(fast.id()) {
            debug!(id = %fast.id(), "deleted fast was current, clearing it");
            self.current_fast = None;
        }
        self.completed_fasts = completed;
        Ok(())
    }

    /// Replace the completed-fast cache with a fresh read, most recent first.
    ///
    /// # Errors
    /// Storage errors from the repository; the cache is left untouched.
    pub fn load_completed_fasts(&mut self) -> Result<&[Fast]> {
        let completed = self.repo.list_completed()?;
        debug!(count = completed.len(), "loaded completed fasts");
        self.completed_fasts = completed;
        Ok(&self.completed_fasts)
    }

    /// Set or clear the mood of any fast.
    ///
    /// # Errors
    /// Storage errors from the repository, including `NotFound`.
    pub fn set_mood(&mut self, fast: &Fast, mood: Option<Mood>) -> Result<Fast> {
        info!(id = %fast.id(), ?mood, "updating fast mood");

        let mut stored = self
            .repo
            .get(fast.id())?
            .ok_or(StorageError::NotFound { id: fast.id().0 })?;
        stored.set_mood(mood);
        self.repo.update(&stored)?;

        if stored.is_active() {
            if self.current_fast.as_ref().map(Fast::id) == Some(stored.id()) {
                self.current_fast = Some(stored.clone());
            }
        } else {
            self.load_completed_fasts()?;
        }
        Ok(stored)
    }
}

fn already_ended(id: FastId) -> CoreError {
    CoreError::InvalidState(format!("fast {id} has already ended"))
}
