//! The training view-model: one session's catalog, set list and draft.
//!
//! This is what a front end holds on to. It forwards each command to the
//! owning component and runs the debounced "show suggestions after typing"
//! behaviour, driven by the timestamps the caller passes in.

use crate::catalog::ExerciseCatalog;
use crate::debounce::Debouncer;
use crate::form::EntryForm;
use crate::session::SessionStore;
use crate::{Config, Result, TrainingSet};
use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug)]
pub struct TrainingSession {
    catalog: ExerciseCatalog,
    store: SessionStore,
    form: EntryForm,
    suggestion_trigger: Debouncer<()>,
}

impl TrainingSession {
    /// Fresh session configured from `config`, with the draft stamped `now`
    pub fn new(config: &Config, now: DateTime<Utc>) -> Self {
        let catalog = ExerciseCatalog::with_favorites(
            config.catalog.max_recents,
            config.catalog.favorites.iter().cloned(),
        );
        let form = EntryForm::with_limits(now, config.weight_input(), config.reps_input());

        tracing::debug!(
            "Session started: {} favorite(s), quiet period {:?}",
            catalog.favorites().len(),
            config.quiet_period()
        );

        Self {
            catalog,
            store: SessionStore::new(),
            form,
            suggestion_trigger: Debouncer::new(config.quiet_period()),
        }
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ExerciseCatalog {
        &mut self.catalog
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn can_save(&self) -> bool {
        self.form.can_save()
    }

    pub fn filtered_suggestions(&self) -> Vec<&str> {
        self.form.filtered_suggestions(&self.catalog)
    }

    /// Text typed into the exercise field.
    ///
    /// Suggestions appear once typing has paused for the quiet period; each
    /// keystroke restarts the wait.
    pub fn type_exercise(&mut self, text: &str, now: Instant) {
        self.form.set_exercise(text);
        self.suggestion_trigger.schedule((), now);
    }

    /// Run the pending suggestion trigger if it is due.
    ///
    /// Returns true when suggestions were just made visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.suggestion_trigger.poll(now).is_none() {
            return false;
        }
        if self.form.exercise().is_empty() || self.form.suggestions_visible() {
            return false;
        }
        self.form.show_suggestions();
        true
    }

    /// Take a suggestion; cancels any pending trigger so the list stays closed
    pub fn select_exercise(&mut self, name: &str) {
        self.suggestion_trigger.cancel();
        self.form.select_exercise(name);
    }

    /// Save the draft. `None` when the draft cannot be saved.
    pub fn save(&mut self) -> Option<Uuid> {
        self.form.save(&mut self.catalog, &mut self.store)
    }

    pub fn reset_draft(&mut self, now: DateTime<Utc>) {
        self.suggestion_trigger.cancel();
        self.form.reset_draft(now);
    }

    /// Save, then reset the draft on success. Returns the stored set.
    pub fn save_and_reset(&mut self, now: DateTime<Utc>) -> Option<&TrainingSet> {
        self.save()?;
        self.reset_draft(now);
        self.store.first()
    }

    pub fn delete_sets<I>(&mut self, positions: I) -> Result<Vec<TrainingSet>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.store.delete_at(positions)
    }

    pub fn clear_sets(&mut self) {
        self.store.clear();
    }

    pub fn add_favorite(&mut self, name: &str) -> bool {
        self.catalog.add_favorite(name)
    }

    pub fn remove_favorite(&mut self, at: usize) -> Result<String> {
        self.catalog.remove_favorite(at)
    }
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self::new(&Config::default(), Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use std::time::Duration;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 6, 18, 30, 0).unwrap()
    }

    fn session() -> TrainingSession {
        logging::init_test();
        TrainingSession::new(&Config::default(), t0())
    }

    #[test]
    fn test_suggestions_shown_after_quiet_period() {
        let mut s = session();
        let start = Instant::now();

        s.type_exercise("B", start);
        s.type_exercise("Be", start + Duration::from_millis(100));
        assert!(!s.tick(start + Duration::from_millis(300)));
        assert!(!s.form().suggestions_visible());

        assert!(s.tick(start + Duration::from_millis(400)));
        assert!(s.form().suggestions_visible());
        // fired once, nothing left pending
        assert!(!s.tick(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_cleared_text_does_not_show_suggestions() {
        let mut s = session();
        let start = Instant::now();
        s.type_exercise("", start);
        assert!(!s.tick(start + Duration::from_secs(1)));
        assert!(!s.form().suggestions_visible());
    }

    #[test]
    fn test_select_cancels_pending_trigger() {
        let mut s = session();
        let start = Instant::now();
        s.type_exercise("dead", start);
        s.select_exercise("Deadlift");

        assert!(!s.tick(start + Duration::from_secs(1)));
        assert!(!s.form().suggestions_visible());
        assert_eq!(s.form().exercise(), "Deadlift");
    }

    #[test]
    fn test_full_flow() {
        let mut s = session();
        let start = Instant::now();

        s.type_exercise("press", start);
        assert_eq!(
            s.filtered_suggestions(),
            ["Bench Press", "Leg Press", "Overhead Press"]
        );
        s.select_exercise("Bench Press");
        s.form_mut().enter_weight_text("60");
        s.form_mut().enter_reps_text("10");
        s.form_mut().set_end_time(t0() + ChronoDuration::seconds(90));
        assert!(s.can_save());

        let later = t0() + ChronoDuration::minutes(5);
        let set = s.save_and_reset(later).unwrap().clone();
        assert_eq!(set.exercise, "Bench Press");
        assert_eq!(set.formatted_duration(), "1:30");

        assert_eq!(s.catalog().recents(), ["Bench Press"]);
        assert_eq!(s.form().exercise(), "");
        assert_eq!(s.form().start_time(), later);
        assert!(!s.can_save());

        // recents lead the suggestion list now
        assert_eq!(s.filtered_suggestions()[0], "Bench Press");
    }

    #[test]
    fn test_save_and_reset_keeps_invalid_draft() {
        let mut s = session();
        s.form_mut().set_exercise("Plank");
        assert!(s.save_and_reset(t0()).is_none());
        assert_eq!(s.form().exercise(), "Plank");
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_delete_and_favorites() {
        let mut s = session();
        for name in ["A", "B", "C"] {
            s.form_mut().set_exercise(name);
            s.form_mut().set_reps(1.0);
            s.save().unwrap();
        }
        assert_eq!(s.store().first().unwrap().exercise, "C");

        s.delete_sets([0, 2]).unwrap();
        assert_eq!(s.store().sets()[0].exercise, "B");
        assert!(s.delete_sets([1]).is_err());

        s.clear_sets();
        assert!(s.store().is_empty());

        assert!(s.add_favorite("Snatch"));
        let count = s.catalog().favorites().len();
        assert!(s.remove_favorite(count).is_err());
        assert_eq!(s.remove_favorite(0).unwrap(), "Barbell Curl");
    }

    #[test]
    fn test_configured_limits_and_catalog() {
        let mut config = Config::default();
        config.catalog.max_recents = 1;
        config.catalog.favorites = vec!["Row".into()];
        config.limits.weight_max = 100;
        let mut s = TrainingSession::new(&config, t0());

        assert_eq!(s.catalog().favorites(), ["Row"]);
        s.form_mut().enter_weight_text("250");
        assert_eq!(s.form().weight(), 100.0);

        s.catalog_mut().add_recent("A");
        s.catalog_mut().add_recent("B");
        assert_eq!(s.catalog().recents(), ["B"]);
    }
}
