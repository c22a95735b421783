use std::collections::{HashMap, HashSet};

use crate::models::Film;

/// Minimum number of watched films (resolvable in the catalog) before
/// personalizing; below this there is too little signal.
pub const MIN_WATCHED_FOR_RECOMMENDATIONS: usize = 3;

const GENRE_AFFINITY_WEIGHT: u32 = 2;
const DIRECTOR_AFFINITY_WEIGHT: u32 = 3;
const WELL_RATED_THRESHOLD: f64 = 7.0;
const WELL_RATED_BONUS: u32 = 2;
const STREAMABLE_BONUS: u32 = 1;

/// Preference weights aggregated from a watch history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteProfile {
    pub genres: HashMap<String, u32>,
    pub directors: HashMap<String, u32>,
    pub decades: HashMap<i32, u32>,
}

impl TasteProfile {
    pub fn from_films<'a>(watched: impl IntoIterator<Item = &'a Film>) -> Self {
        let mut profile = Self::default();
        for film in watched {
            for genre in &film.genres {
                *profile.genres.entry(genre.clone()).or_insert(0) += 1;
            }
            for director in &film.directors {
                *profile.directors.entry(director.clone()).or_insert(0) += 1;
            }
            *profile.decades.entry(film.decade()).or_insert(0) += 1;
        }
        profile
    }

    /// Affinity of an unwatched film; 0 means no signal at all
    pub fn affinity(&self, film: &Film) -> u32 {
        let genres: u32 = film
            .genres
            .iter()
            .map(|g| self.genres.get(g).copied().unwrap_or(0) * GENRE_AFFINITY_WEIGHT)
            .sum();
        let directors: u32 = film
            .directors
            .iter()
            .map(|d| self.directors.get(d).copied().unwrap_or(0) * DIRECTOR_AFFINITY_WEIGHT)
            .sum();
        let decade = self.decades.get(&film.decade()).copied().unwrap_or(0);

        let mut score = genres + directors + decade;
        if film.vote_average >= WELL_RATED_THRESHOLD {
            score += WELL_RATED_BONUS;
        }
        if film.is_streamable {
            score += STREAMABLE_BONUS;
        }
        score
    }
}

/// Ranks unwatched films by affinity with the user's watch history
///
/// Returns an empty list when fewer than three watched ids resolve against
/// `films` (cold start). Films with no affinity are dropped; ties are broken
/// by catalog rating.
pub fn recommend(films: &[Film], watched_ids: &HashSet<String>, limit: usize) -> Vec<Film> {
    let watched: Vec<&Film> = films.iter().filter(|f| watched_ids.contains(&f.id)).collect();

    if watched.len() < MIN_WATCHED_FOR_RECOMMENDATIONS {
        tracing::debug!(
            watched = watched.len(),
            required = MIN_WATCHED_FOR_RECOMMENDATIONS,
            "Not enough watch history to recommend"
        );
        return Vec::new();
    }

    let profile = TasteProfile::from_films(watched);

    let scored: Vec<(u32, &Film)> = films
        .iter()
        .filter(|f| !watched_ids.contains(&f.id))
        .map(|f| (profile.affinity(f), f))
        .collect();

    let results = rank(scored, limit);
    tracing::debug!(recommended = results.len(), "Built recommendations");
    results
}

/// "You might also like" for a single film page
///
/// A cheaper formula than [`crate::services::similarity::score`], weighted
/// toward shared genres; the two are intentionally kept separate.
pub fn similar(film: &Film, films: &[Film], limit: usize) -> Vec<Film> {
    let scored: Vec<(u32, &Film)> = films
        .iter()
        .filter(|other| other.id != film.id)
        .map(|other| (similar_score(film, other), other))
        .collect();

    rank(scored, limit)
}

fn similar_score(film: &Film, other: &Film) -> u32 {
    let shared_genres = other.genres.iter().filter(|g| film.genres.contains(g)).count() as u32;

    let mut score = shared_genres * 3;
    if other.decade() == film.decade() {
        score += 2;
    }
    if other.directors.iter().any(|d| film.directors.contains(d)) {
        score += 4;
    }
    if other.vote_average >= WELL_RATED_THRESHOLD {
        score += 1;
    }
    score
}

/// Drops zero scores, sorts by score then rating (both descending), truncates
fn rank(mut scored: Vec<(u32, &Film)>, limit: usize) -> Vec<Film> {
    scored.retain(|(score, _)| *score > 0);
    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| b.vote_average.total_cmp(&a.vote_average))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, film)| film.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(id: &str, year: i32, genres: &[&str], directors: &[&str], rating: f64, streamable: bool) -> Film {
        Film {
            id: id.to_string(),
            title: id.to_string(),
            year,
            poster_url: None,
            tmdb_id: None,
            imdb_id: None,
            internet_archive_id: None,
            youtube_id: None,
            vote_average: rating,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            directors: directors.iter().map(|d| d.to_string()).collect(),
            language: None,
            is_streamable: streamable,
        }
    }

    fn ids(films: &[Film]) -> Vec<&str> {
        films.iter().map(|f| f.id.as_str()).collect()
    }

    fn watched(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn history() -> Vec<Film> {
        vec![
            film("A", 1941, &["Drama"], &["X"], 7.0, false),
            film("B", 1944, &["Drama"], &["Y"], 6.5, false),
            film("C", 1952, &["Comedy"], &["X"], 6.0, false),
        ]
    }

    #[test]
    fn test_affinity_scenario() {
        let profile = TasteProfile::from_films(&history());
        assert_eq!(profile.genres.get("Drama"), Some(&2));
        assert_eq!(profile.directors.get("X"), Some(&2));
        assert_eq!(profile.decades.get(&1940), Some(&2));

        let d = film("D", 1947, &["Drama"], &["X"], 7.5, true);
        assert_eq!(profile.affinity(&d), 15);
    }

    #[test]
    fn test_cold_start() {
        let mut films = history();
        films.push(film("D", 1947, &["Drama"], &["X"], 7.5, true));

        assert!(recommend(&films, &watched(&["A", "B"]), 10).is_empty());
        // unknown ids do not count toward the history
        assert!(recommend(&films, &watched(&["A", "B", "Q404"]), 10).is_empty());
    }

    #[test]
    fn test_recommend_excludes_watched_and_zero_scores() {
        let mut films = history();
        films.push(film("D", 1947, &["Drama"], &["X"], 7.5, true));
        films.push(film("E", 1975, &["Western"], &["Z"], 5.0, false));

        let results = recommend(&films, &watched(&["A", "B", "C"]), 10);
        assert_eq!(ids(&results), vec!["D"]);
    }

    #[test]
    fn test_recommend_ties_broken_by_rating_and_limited() {
        let mut films = history();
        films.push(film("D", 1953, &["Comedy"], &[], 6.2, false));
        films.push(film("E", 1956, &["Comedy"], &[], 6.9, false));
        films.push(film("F", 1941, &["Drama"], &["X"], 8.0, true));

        let results = recommend(&films, &watched(&["A", "B", "C"]), 2);
        // F: 4 + 6 + 2 + 2 + 1 = 15; E and D: 2 + 1 = 3, E rated higher
        assert_eq!(ids(&results), vec!["F", "E"]);
    }

    #[test]
    fn test_similar_scores() {
        let base = film("A", 1941, &["Drama", "Mystery"], &["Welles"], 8.3, true);
        let films = vec![
            base.clone(),
            film("B", 1946, &["Mystery"], &["Welles"], 7.4, true),
            film("C", 1948, &["Drama", "Mystery"], &["Reed"], 6.0, false),
            film("D", 1925, &["Comedy"], &["Chaplin"], 8.2, true),
            film("E", 1933, &["Western"], &["Ford"], 5.0, false),
        ];

        // B: 3 + 2 + 4 + 1 = 10, C: 6 + 2 = 8, D: 1, E: 0
        let results = similar(&base, &films, 10);
        assert_eq!(ids(&results), vec!["B", "C", "D"]);

        let results = similar(&base, &films, 1);
        assert_eq!(ids(&results), vec!["B"]);
    }
}
