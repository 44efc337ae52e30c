//! Exercise names offered for autocompletion.
//!
//! Two lists: user-curated favorites, sorted and unique ignoring case, and a
//! short most-recently-used list fed by every saved set.

use crate::observer::{Observers, SubscriptionId};
use crate::{CatalogEvent, Error, Result};
use once_cell::sync::Lazy;

/// Number of recent exercises kept unless configured otherwise
pub const DEFAULT_MAX_RECENTS: usize = 5;

/// Built-in favorites a fresh catalog starts with
static DEFAULT_FAVORITES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Bench Press",
        "Squats",
        "Deadlift",
        "Pull-ups",
        "Push-ups",
        "Overhead Press",
        "Bent-over Row",
        "Barbell Curl",
        "Triceps Pushdown",
        "Leg Press",
        "Lunges",
        "Plank",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// Get the built-in favorites list
pub fn default_favorites() -> &'static [String] {
    &DEFAULT_FAVORITES
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Favorites and recents for one session
#[derive(Debug)]
pub struct ExerciseCatalog {
    favorites: Vec<String>,
    recents: Vec<String>,
    max_recents: usize,
    observers: Observers<CatalogEvent>,
}

impl ExerciseCatalog {
    /// Empty catalog keeping at most `max_recents` recent names
    pub fn new(max_recents: usize) -> Self {
        Self {
            favorites: Vec::new(),
            recents: Vec::new(),
            max_recents,
            observers: Observers::new(),
        }
    }

    /// Catalog seeded with `favorites`, deduplicated and sorted
    pub fn with_favorites<I, S>(max_recents: usize, favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new(max_recents);
        for name in favorites {
            let name = name.into();
            if !name.trim().is_empty() && !catalog.contains_favorite(&name) {
                catalog.favorites.push(name);
            }
        }
        catalog.sort_favorites();
        catalog
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Most recent first
    pub fn recents(&self) -> &[String] {
        &self.recents
    }

    pub fn max_recents(&self) -> usize {
        self.max_recents
    }

    pub fn contains_favorite(&self, name: &str) -> bool {
        self.favorites.iter().any(|f| same_name(f, name))
    }

    /// Recents followed by favorites, the list suggestions are drawn from
    pub fn suggestion_pool(&self) -> impl Iterator<Item = &str> {
        self.recents
            .iter()
            .chain(self.favorites.iter())
            .map(String::as_str)
    }

    /// Record that `name` was just used.
    ///
    /// Any existing entry with the same name (ignoring case) is dropped and
    /// `name` goes to the front with the casing given here.
    pub fn add_recent(&mut self, name: &str) {
        self.recents.retain(|r| !same_name(r, name));
        self.recents.insert(0, name.to_string());
        self.recents.truncate(self.max_recents);

        tracing::debug!("Recent exercises: {:?}", self.recents);
        self.observers.notify(&CatalogEvent::RecentsChanged);
    }

    /// Add a favorite unless one with the same name (ignoring case) exists.
    ///
    /// Returns true if the list changed. Blank names are ignored.
    pub fn add_favorite(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.contains_favorite(name) {
            tracing::debug!("Favorite {:?} not added (blank or duplicate)", name);
            return false;
        }

        self.favorites.push(name.to_string());
        self.sort_favorites();

        tracing::info!("Added favorite exercise {:?}", name);
        self.observers.notify(&CatalogEvent::FavoritesChanged);
        true
    }

    /// Remove the favorite at `at`, returning its name
    pub fn remove_favorite(&mut self, at: usize) -> Result<String> {
        if at >= self.favorites.len() {
            return Err(Error::IndexOutOfRange {
                index: at,
                len: self.favorites.len(),
            });
        }

        let removed = self.favorites.remove(at);
        tracing::info!("Removed favorite exercise {:?}", removed);
        self.observers.notify(&CatalogEvent::FavoritesChanged);
        Ok(removed)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CatalogEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn sort_favorites(&mut self) {
        self.favorites.sort_by_cached_key(|name| name.to_lowercase());
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::with_favorites(DEFAULT_MAX_RECENTS, default_favorites().iter().cloned())
    }
}
