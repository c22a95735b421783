use std::collections::HashMap;

use serde::Serialize;

use crate::models::{DecadeCount, Film, NamedCount, WatchedItem};

const TOP_ENTRIES: usize = 5;

/// Aggregates shown on the user's profile page
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchStats {
    pub total_watched: usize,
    /// Watched items whose film is still in the catalog
    pub resolved: usize,
    pub average_user_rating: Option<f64>,
    /// Mean catalog rating of watched films, unrated films excluded
    pub average_catalog_rating: Option<f64>,
    pub top_genres: Vec<NamedCount>,
    pub top_directors: Vec<NamedCount>,
    pub decades: Vec<DecadeCount>,
    pub streamable: usize,
}

pub fn watch_stats(films: &[Film], watched: &[WatchedItem]) -> WatchStats {
    let by_id: HashMap<&str, &Film> = films.iter().map(|f| (f.id.as_str(), f)).collect();
    let resolved: Vec<&Film> = watched
        .iter()
        .filter_map(|w| by_id.get(w.movie_id.as_str()).copied())
        .collect();

    let average_user_rating = mean(watched.iter().filter_map(|w| w.user_rating.map(f64::from)));
    let average_catalog_rating = mean(resolved.iter().filter(|f| f.is_rated()).map(|f| f.vote_average));

    let mut genres: HashMap<&str, usize> = HashMap::new();
    let mut directors: HashMap<&str, usize> = HashMap::new();
    let mut decades: HashMap<i32, usize> = HashMap::new();
    for film in &resolved {
        for genre in &film.genres {
            *genres.entry(genre.as_str()).or_insert(0) += 1;
        }
        for director in &film.directors {
            *directors.entry(director.as_str()).or_insert(0) += 1;
        }
        *decades.entry(film.decade()).or_insert(0) += 1;
    }

    let mut decades: Vec<DecadeCount> = decades
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect();
    decades.sort_by_key(|d| d.decade);

    WatchStats {
        total_watched: watched.len(),
        resolved: resolved.len(),
        average_user_rating,
        average_catalog_rating,
        top_genres: top_counts(genres),
        top_directors: top_counts(directors),
        decades,
        streamable: resolved.iter().filter(|f| f.is_streamable).count(),
    }
}

/// `None` for an empty input rather than NaN
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Highest counts first, alphabetical among equals
fn top_counts(counts: HashMap<&str, usize>) -> Vec<NamedCount> {
    let mut entries: Vec<NamedCount> = counts
        .into_iter()
        .map(|(name, count)| NamedCount {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(TOP_ENTRIES);
    entries
}
