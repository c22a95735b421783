use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod collection;
mod filter;
mod quiz;

pub use collection::{UserCollection, WatchedItem};
pub use filter::{FilterSpec, SortBy, SortDirection};
pub use quiz::{Answer, Era, Mood, QuizAnswers, RatingTier};

/// Returns the decade bucket of a year (`floor(year / 10) * 10`)
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// A single catalog entry
///
/// Films are immutable once loaded; every engine function borrows them and
/// returns new vectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Globally unique within a catalog load (Wikidata QID upstream)
    pub id: String,
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub internet_archive_id: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    /// 0-10 scale; `0.0` means unrated
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Has an Internet Archive or YouTube source
    #[serde(default)]
    pub is_streamable: bool,
}

impl Film {
    pub fn decade(&self) -> i32 {
        decade_of(self.year)
    }

    pub fn is_rated(&self) -> bool {
        self.vote_average > 0.0
    }

    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }

    /// Genres lowercased with full Unicode case folding
    pub fn folded_genres(&self) -> impl Iterator<Item = String> + '_ {
        self.genres.iter().map(|g| g.to_lowercase())
    }

    /// Case-insensitive genre equality
    pub fn has_genre(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.folded_genres().any(|g| g == genre)
    }
}

/// Count attached to a genre or director name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

/// Count of films in a decade bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecadeCount {
    pub decade: i32,
    pub count: usize,
}

/// Aggregate descriptors computed when the catalog snapshot is built
///
/// The engine reads these for filter UIs but never recomputes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    #[serde(default)]
    pub decades: Vec<DecadeCount>,
    #[serde(default)]
    pub genres: Vec<NamedCount>,
    #[serde(default)]
    pub top_directors: Vec<NamedCount>,
    #[serde(default)]
    pub total_movies: Option<usize>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Raw catalog document as written by the ingestion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub meta: CatalogMeta,
    pub movies: Vec<Film>,
}
