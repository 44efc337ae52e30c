//! Core domain types for trainlog.
//!
//! This module defines the recorded set and the small value types
//! shared by the form, the session store and the change events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Training Set
// ============================================================================

/// One completed exercise set.
///
/// Built only by [`EntryForm::save`](crate::form::EntryForm::save), which
/// guarantees a non-empty exercise, `reps >= 1` and `end_time >= start_time`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingSet {
    pub id: Uuid,
    pub exercise: String,
    /// Kilograms; zero for bodyweight work
    pub weight: u32,
    pub reps: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TrainingSet {
    pub(crate) fn new(
        exercise: String,
        weight: u32,
        reps: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise,
            weight,
            reps,
            start_time,
            end_time,
        }
    }

    /// Time spent on the set
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Duration rendered as `m:ss`
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration())
    }

    /// Weight times reps
    pub fn volume(&self) -> u64 {
        u64::from(self.weight) * u64::from(self.reps)
    }
}

/// Render a duration as whole minutes and zero-padded seconds.
///
/// Negative durations render as `0:00`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

// ============================================================================
// Change Events
// ============================================================================

/// Emitted by [`ExerciseCatalog`](crate::catalog::ExerciseCatalog) after a mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEvent {
    RecentsChanged,
    FavoritesChanged,
}

/// Emitted by [`SessionStore`](crate::session::SessionStore) after a mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Inserted(Uuid),
    /// Pre-deletion positions that were removed, ascending
    Deleted(Vec<usize>),
    Cleared,
}

/// Draft field identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DraftField {
    Exercise,
    Weight,
    Reps,
    StartTime,
    EndTime,
}

/// Emitted by [`EntryForm`](crate::form::EntryForm) after a mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftEvent {
    FieldChanged(DraftField),
    SuggestionsVisibility(bool),
    Reset,
}
