//! Draft state for the next set and the rules for saving it.

use crate::catalog::ExerciseCatalog;
use crate::numeric::{truncate, NumericInput};
use crate::observer::{Observers, SubscriptionId};
use crate::session::SessionStore;
use crate::{DraftEvent, DraftField, TrainingSet};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// The in-progress, not yet saved set
#[derive(Debug)]
pub struct EntryForm {
    exercise: String,
    weight: f64,
    reps: f64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    suggestions_visible: bool,
    weight_input: NumericInput,
    reps_input: NumericInput,
    observers: Observers<DraftEvent>,
}

impl EntryForm {
    /// Blank draft with both timestamps at `now` and default input limits
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_limits(now, NumericInput::weight(), NumericInput::reps())
    }

    pub fn with_limits(
        now: DateTime<Utc>,
        weight_input: NumericInput,
        reps_input: NumericInput,
    ) -> Self {
        Self {
            exercise: String::new(),
            weight: 0.0,
            reps: 0.0,
            start_time: now,
            end_time: now,
            suggestions_visible: false,
            weight_input,
            reps_input,
            observers: Observers::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reps(&self) -> f64 {
        self.reps
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn weight_input(&self) -> &NumericInput {
        &self.weight_input
    }

    pub fn reps_input(&self) -> &NumericInput {
        &self.reps_input
    }

    /// Whether the draft would produce a valid set.
    ///
    /// Weight is deliberately unchecked: zero is a bodyweight set.
    /// Reps are compared after truncation, so a fractional draft such as
    /// 0.5 reps is refused even though it is above zero; a stored set
    /// always has at least one whole rep.
    pub fn can_save(&self) -> bool {
        !self.exercise.is_empty() && truncate(self.reps) > 0 && self.end_time >= self.start_time
    }

    /// Recents then favorites, narrowed to names containing the typed text
    /// (ignoring case). Everything is returned while the text is empty.
    pub fn filtered_suggestions<'c>(&self, catalog: &'c ExerciseCatalog) -> Vec<&'c str> {
        if self.exercise.is_empty() {
            return catalog.suggestion_pool().collect();
        }

        let needle = self.exercise.to_lowercase();
        catalog
            .suggestion_pool()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    // ------------------------------------------------------------------
    // Field setters
    // ------------------------------------------------------------------

    pub fn set_exercise(&mut self, text: impl Into<String>) {
        self.exercise = text.into();
        self.observers
            .notify(&DraftEvent::FieldChanged(DraftField::Exercise));
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.observers
            .notify(&DraftEvent::FieldChanged(DraftField::Weight));
    }

    pub fn set_reps(&mut self, reps: f64) {
        self.reps = reps;
        self.observers.notify(&DraftEvent::FieldChanged(DraftField::Reps));
    }

    /// Weight typed as free text, coerced into range
    pub fn enter_weight_text(&mut self, text: &str) {
        let value = self.weight_input.parse(text);
        self.set_weight(value);
    }

    /// Reps typed as free text, coerced into range
    pub fn enter_reps_text(&mut self, text: &str) {
        let value = self.reps_input.parse(text);
        self.set_reps(value);
    }

    pub fn increment_weight(&mut self) {
        let value = self.weight_input.increment(self.weight);
        self.set_weight(value);
    }

    pub fn decrement_weight(&mut self) {
        let value = self.weight_input.decrement(self.weight);
        self.set_weight(value);
    }

    pub fn increment_reps(&mut self) {
        let value = self.reps_input.increment(self.reps);
        self.set_reps(value);
    }

    pub fn decrement_reps(&mut self) {
        let value = self.reps_input.decrement(self.reps);
        self.set_reps(value);
    }

    /// Moving the start does not drag the end along; a start past the end
    /// just makes the draft unsaveable until the end is set again.
    pub fn set_start_time(&mut self, start: DateTime<Utc>) {
        self.start_time = start;
        self.observers
            .notify(&DraftEvent::FieldChanged(DraftField::StartTime));
    }

    /// An end before the current start is clamped up to the start.
    pub fn set_end_time(&mut self, end: DateTime<Utc>) {
        if end < self.start_time {
            tracing::debug!(
                "End time {} precedes start {}, clamping",
                end,
                self.start_time
            );
            self.end_time = self.start_time;
        } else {
            self.end_time = end;
        }
        self.observers
            .notify(&DraftEvent::FieldChanged(DraftField::EndTime));
    }

    pub fn show_suggestions(&mut self) {
        self.set_suggestions_visible(true);
    }

    pub fn hide_suggestions(&mut self) {
        self.set_suggestions_visible(false);
    }

    fn set_suggestions_visible(&mut self, visible: bool) {
        if self.suggestions_visible != visible {
            self.suggestions_visible = visible;
            self.observers
                .notify(&DraftEvent::SuggestionsVisibility(visible));
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Take a suggested name. Always succeeds.
    pub fn select_exercise(&mut self, name: &str) {
        self.set_exercise(name);
        self.hide_suggestions();
    }

    /// Record the draft as a set.
    ///
    /// Silently does nothing (returns `None`) when [`can_save`](Self::can_save)
    /// is false. On success the exercise goes to the front of the recents,
    /// the set goes to the front of the session, and its id is returned.
    /// The draft itself is left as is; call [`reset_draft`](Self::reset_draft).
    pub fn save(&self, catalog: &mut ExerciseCatalog, store: &mut SessionStore) -> Option<Uuid> {
        if !self.can_save() {
            tracing::debug!("Draft not saveable, ignoring save");
            return None;
        }

        let set = TrainingSet::new(
            self.exercise.clone(),
            truncate(self.weight),
            truncate(self.reps),
            self.start_time,
            self.end_time,
        );
        let id = set.id;

        tracing::info!(
            "Saved set: {} {}kg x {} ({})",
            set.exercise,
            set.weight,
            set.reps,
            set.formatted_duration()
        );

        catalog.add_recent(&self.exercise);
        store.insert_front(set);
        Some(id)
    }

    /// Back to a blank draft with both timestamps at `now`
    pub fn reset_draft(&mut self, now: DateTime<Utc>) {
        self.exercise.clear();
        self.weight = 0.0;
        self.reps = 0.0;
        self.start_time = now;
        self.end_time = now;
        self.suggestions_visible = false;
        self.observers.notify(&DraftEvent::Reset);
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&DraftEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
