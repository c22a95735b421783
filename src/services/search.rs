use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::{decade_of, FilterSpec, Film, SortBy, SortDirection};

/// Filters and sorts films against a structured filter spec
///
/// Predicates narrow the working set in a fixed order (free text, decade,
/// genre, director, language, year range, streamable, rating). The order only
/// affects traversal cost, never the resulting set. Sorting is stable: films
/// that compare equal keep their catalog order.
pub fn search(films: &[Film], spec: &FilterSpec) -> Vec<Film> {
    let query = spec.query.trim().to_lowercase();
    let decades: HashSet<i32> = spec.decades.iter().copied().collect();
    let genres: HashSet<&str> = spec.genres.iter().map(String::as_str).collect();
    let directors: HashSet<String> = spec.directors.iter().map(|d| d.to_lowercase()).collect();
    let languages: HashSet<&str> = spec.languages.iter().map(String::as_str).collect();

    let mut results: Vec<Film> = films
        .iter()
        .filter(|f| query.is_empty() || matches_query(f, &query))
        .filter(|f| decades.is_empty() || decades.contains(&decade_of(f.year)))
        .filter(|f| genres.is_empty() || f.genres.iter().any(|g| genres.contains(g.as_str())))
        .filter(|f| {
            directors.is_empty() || f.directors.iter().any(|d| directors.contains(&d.to_lowercase()))
        })
        .filter(|f| match (&f.language, languages.is_empty()) {
            (Some(language), false) => languages.contains(language.as_str()),
            _ => true,
        })
        .filter(|f| match spec.year_range {
            Some((min, max)) => f.year >= min && f.year <= max,
            None => true,
        })
        .filter(|f| !spec.streamable_only || f.is_streamable)
        .filter(|f| f.vote_average >= spec.min_rating)
        .cloned()
        .collect();

    sort_films(&mut results, spec.sort_by, spec.sort_direction);

    tracing::debug!(
        total = films.len(),
        matched = results.len(),
        "Catalog search"
    );

    results
}

/// Stable in-place sort by the selected field
pub fn sort_films(films: &mut [Film], sort_by: SortBy, direction: SortDirection) {
    films.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Title => compare_titles(&a.title, &b.title),
            SortBy::Year => a.year.cmp(&b.year),
            SortBy::Rating => a.vote_average.total_cmp(&b.vote_average),
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Title collation: accent- and case-folded first, raw text only to order variants
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Primary sort key: NFD with combining marks dropped, then lowercased
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn matches_query(film: &Film, query: &str) -> bool {
    film.title.to_lowercase().contains(query)
        || film.directors.iter().any(|d| d.to_lowercase().contains(query))
}
