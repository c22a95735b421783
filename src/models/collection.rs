use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A film the user has marked as watched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedItem {
    pub movie_id: String,
    pub watched_at: DateTime<Utc>,
    /// 1-10, when the user rated it
    #[serde(default)]
    pub user_rating: Option<u8>,
}

/// The user's personal collection: watch history, watchlist and favorites
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCollection {
    pub watched: Vec<WatchedItem>,
    pub watchlist: Vec<String>,
    pub favorites: Vec<String>,
}

impl UserCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a film as watched
    ///
    /// Re-marking an already watched film updates its rating and timestamp.
    /// A watched film leaves the watchlist.
    pub fn mark_watched(&mut self, movie_id: &str, user_rating: Option<u8>, watched_at: DateTime<Utc>) {
        let user_rating = user_rating.map(|r| r.clamp(1, 10));

        if let Some(existing) = self.watched.iter_mut().find(|w| w.movie_id == movie_id) {
            existing.user_rating = user_rating;
            existing.watched_at = watched_at;
        } else {
            self.watched.push(WatchedItem {
                movie_id: movie_id.to_string(),
                watched_at,
                user_rating,
            });
        }

        self.watchlist.retain(|id| id != movie_id);
    }

    /// Returns true if the film was in the watch history
    pub fn unmark_watched(&mut self, movie_id: &str) -> bool {
        let before = self.watched.len();
        self.watched.retain(|w| w.movie_id != movie_id);
        self.watched.len() != before
    }

    pub fn add_to_watchlist(&mut self, movie_id: &str) {
        if !self.watchlist.iter().any(|id| id == movie_id) {
            self.watchlist.push(movie_id.to_string());
        }
    }

    pub fn remove_from_watchlist(&mut self, movie_id: &str) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|id| id != movie_id);
        self.watchlist.len() != before
    }

    /// Flips the favorite flag and returns the new state
    pub fn toggle_favorite(&mut self, movie_id: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|id| id == movie_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(movie_id.to_string());
            true
        }
    }

    pub fn is_watched(&self, movie_id: &str) -> bool {
        self.watched.iter().any(|w| w.movie_id == movie_id)
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorites.iter().any(|id| id == movie_id)
    }

    /// Id set consumed by the recommendation engine
    pub fn watched_ids(&self) -> HashSet<String> {
        self.watched.iter().map(|w| w.movie_id.clone()).collect()
    }
}
