//! In-memory list of the sets recorded in the current session.
//!
//! Newest first. Nothing here outlives the process.

use crate::observer::{Observers, SubscriptionId};
use crate::{Error, Result, SessionEvent, TrainingSet};
use std::collections::BTreeSet;

/// Ordered collection of recorded sets, newest at position 0
#[derive(Debug, Default)]
pub struct SessionStore {
    sets: Vec<TrainingSet>,
    observers: Observers<SessionEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> &[TrainingSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Most recently recorded set
    pub fn first(&self) -> Option<&TrainingSet> {
        self.sets.first()
    }

    pub fn get(&self, index: usize) -> Option<&TrainingSet> {
        self.sets.get(index)
    }

    /// Sum of weight x reps over the session
    pub fn total_volume(&self) -> u64 {
        self.sets.iter().map(TrainingSet::volume).sum()
    }

    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|s| u64::from(s.reps)).sum()
    }

    pub fn insert_front(&mut self, set: TrainingSet) {
        let id = set.id;
        tracing::debug!("Recording set {} ({})", id, set.exercise);
        self.sets.insert(0, set);
        self.observers.notify(&SessionEvent::Inserted(id));
    }

    /// Remove every set at `positions` in one step.
    ///
    /// Positions are read against the list as it is before the call, so
    /// `[0, 2]` on `[A, B, C]` leaves `[B]`. Repeated positions count once.
    /// If any position is out of bounds nothing is removed.
    pub fn delete_at<I>(&mut self, positions: I) -> Result<Vec<TrainingSet>>
    where
        I: IntoIterator<Item = usize>,
    {
        let positions: BTreeSet<usize> = positions.into_iter().collect();
        let len = self.sets.len();

        if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
            return Err(Error::IndexOutOfRange { index: bad, len });
        }
        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::with_capacity(positions.len());
        let mut kept = Vec::with_capacity(len - positions.len());
        for (index, set) in std::mem::take(&mut self.sets).into_iter().enumerate() {
            if positions.contains(&index) {
                removed.push(set);
            } else {
                kept.push(set);
            }
        }
        self.sets = kept;

        tracing::info!("Deleted {} set(s) at {:?}", removed.len(), positions);
        self.observers
            .notify(&SessionEvent::Deleted(positions.into_iter().collect()));
        Ok(removed)
    }

    pub fn clear(&mut self) {
        let count = self.sets.len();
        self.sets.clear();
        tracing::info!("Cleared session ({} set(s))", count);
        self.observers.notify(&SessionEvent::Cleared);
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
