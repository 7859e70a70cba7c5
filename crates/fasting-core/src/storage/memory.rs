//! In-memory fast repository.
//!
//! Mirrors the SQLite repository's behavior without touching disk, including
//! the single-active-fast constraint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::FastRepository;
use crate::error::StorageError;
use crate::fast::{Fast, FastId, TargetInterval};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    fasts: BTreeMap<FastId, Fast>,
    next_id: i64,
    unavailable: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error until reset.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn len(&self) -> usize {
        self.fasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fasts.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::QueryFailed("repository unavailable".into()));
        }
        Ok(())
    }
}

impl FastRepository for MemoryRepository {
    fn create(
        &mut self,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        target_interval: TargetInterval,
    ) -> Result<Fast, StorageError> {
        self.check()?;
        if end_date.is_none() && self.fasts.values().any(Fast::is_active) {
            return Err(StorageError::QueryFailed(
                "UNIQUE constraint failed: only one active fast allowed".into(),
            ));
        }
        self.next_id += 1;
        let fast = Fast::from_parts(
            FastId(self.next_id),
            start_date,
            end_date,
            target_interval,
            None,
        );
        self.fasts.insert(fast.id(), fast.clone());
        Ok(fast)
    }

    fn get(&self, id: FastId) -> Result<Option<Fast>, StorageError> {
        self.check()?;
        Ok(self.fasts.get(&id).cloned())
    }

    fn update(&mut self, fast: &Fast) -> Result<(), StorageError> {
        self.check()?;
        match self.fasts.get_mut(&fast.id()) {
            Some(stored) => {
                *stored = fast.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound { id: fast.id().0 }),
        }
    }

    fn delete(&mut self, id: FastId) -> Result<(), StorageError> {
        self.check()?;
        self.fasts
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound { id: id.0 })
    }

    fn list_completed(&self) -> Result<Vec<Fast>, StorageError> {
        self.check()?;
        let mut completed: Vec<Fast> = self
            .fasts
            .values()
            .filter(|fast| !fast.is_active())
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.end_date().cmp(&a.end_date()));
        Ok(completed)
    }

    fn active(&self) -> Result<Option<Fast>, StorageError> {
        self.check()?;
        Ok(self.fasts.values().find(|fast| fast.is_active()).cloned())
    }
}
