use std::collections::HashSet;

use serde::Serialize;

use crate::models::Film;

/// Fixed denominator of the composite score
const MAX_SCORE: u32 = 100;

const GENRE_WEIGHT: f64 = 30.0;
const SAME_DECADE: u32 = 15;
const NEAR_DECADE: u32 = 7;
const NEAR_YEARS: i32 = 15;
const LANGUAGE_MATCH: u32 = 15;
const RATING_WEIGHT: f64 = 20.0;
const RATING_PENALTY_PER_POINT: f64 = 4.0;
const SHARED_DIRECTOR: u32 = 20;

/// Per-dimension contributions of a similarity score
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityBreakdown {
    pub genres: u32,
    pub era: u32,
    pub language: u32,
    pub rating: u32,
    pub directors: u32,
    pub total: u8,
}

/// Symmetric 0-100 compatibility score between two films
pub fn score(a: &Film, b: &Film) -> u8 {
    breakdown(a, b).total
}

/// Computes every sub-score and the composite total
///
/// Sub-scores that cannot apply (missing language, unrated film) contribute 0
/// and still count against the fixed maximum of 100, so films lacking
/// comparable metadata score lower.
pub fn breakdown(a: &Film, b: &Film) -> SimilarityBreakdown {
    let genres = genre_overlap(a, b);
    let era = decade_proximity(a, b);
    let language = language_match(a, b);
    let rating = rating_proximity(a, b);
    let directors = shared_directors(a, b);

    let sum = genres + era + language + rating + directors;
    let total = (f64::from(sum) / f64::from(MAX_SCORE) * 100.0).round().min(100.0) as u8;

    SimilarityBreakdown {
        genres,
        era,
        language,
        rating,
        directors,
        total,
    }
}

fn genre_overlap(a: &Film, b: &Film) -> u32 {
    let left: HashSet<&str> = a.genres.iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.genres.iter().map(String::as_str).collect();

    let total = left.union(&right).count();
    if total == 0 {
        return 0;
    }

    let shared = left.intersection(&right).count();
    (shared as f64 / total as f64 * GENRE_WEIGHT).round() as u32
}

fn decade_proximity(a: &Film, b: &Film) -> u32 {
    if a.decade() == b.decade() {
        SAME_DECADE
    } else if (a.year - b.year).abs() <= NEAR_YEARS {
        NEAR_DECADE
    } else {
        0
    }
}

fn language_match(a: &Film, b: &Film) -> u32 {
    match (&a.language, &b.language) {
        (Some(left), Some(right)) if left == right => LANGUAGE_MATCH,
        _ => 0,
    }
}

fn rating_proximity(a: &Film, b: &Film) -> u32 {
    if !a.is_rated() || !b.is_rated() {
        return 0;
    }

    let diff = (a.vote_average - b.vote_average).abs();
    (RATING_WEIGHT - diff * RATING_PENALTY_PER_POINT).max(0.0).round() as u32
}

fn shared_directors(a: &Film, b: &Film) -> u32 {
    if a.directors.iter().any(|d| b.directors.contains(d)) {
        SHARED_DIRECTOR
    } else {
        0
    }
}
