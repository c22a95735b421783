use serde::Serialize;

use crate::models::Film;

/// Films kept per collection
pub const COLLECTION_CAP: usize = 12;
/// Smaller pools are not worth a shelf
pub const MIN_COLLECTION_SIZE: usize = 4;

/// A named, rule-derived subset of the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CuratedCollection {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub movies: Vec<Film>,
}

struct Rule {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    matches: fn(&Film) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        slug: "film-noir-essentials",
        name: "Film Noir Essentials",
        description: "Shadows, fatalism and hard-boiled crime from the golden age of noir.",
        matches: is_noir,
    },
    Rule {
        slug: "silent-cinema-treasures",
        name: "Silent Cinema Treasures",
        description: "Masterpieces from before the talkies took over.",
        matches: |f: &Film| f.year < 1930,
    },
    Rule {
        slug: "classic-horror",
        name: "Classic Horror",
        description: "Monsters, mad scientists and the birth of the horror film.",
        matches: |f: &Film| f.has_genre("horror"),
    },
    Rule {
        slug: "best-free-films",
        name: "Best Free Films",
        description: "Well-rated films you can stream right now, free.",
        matches: |f: &Film| f.is_streamable && f.vote_average >= 6.0,
    },
    Rule {
        slug: "classic-comedies",
        name: "Classic Comedies",
        description: "Slapstick, screwball and sophisticated laughs.",
        matches: |f: &Film| f.has_genre("comedy"),
    },
];

fn is_noir(film: &Film) -> bool {
    let noir_genre = film
        .folded_genres()
        .any(|g| g.contains("noir") || g == "crime" || g == "mystery");
    noir_genre && (1940..=1959).contains(&film.year)
}

/// Assembles the thematic collections for the current catalog
///
/// Each pool is ordered by rating (best first) and capped; pools with fewer
/// than [`MIN_COLLECTION_SIZE`] qualifying films are left out.
pub fn curated_collections(films: &[Film]) -> Vec<CuratedCollection> {
    RULES
        .iter()
        .filter_map(|rule| {
            let mut pool: Vec<&Film> = films.iter().filter(|f| (rule.matches)(f)).collect();

            if pool.len() < MIN_COLLECTION_SIZE {
                tracing::debug!(collection = rule.slug, size = pool.len(), "Collection pool too small");
                return None;
            }

            pool.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));

            Some(CuratedCollection {
                slug: rule.slug,
                name: rule.name,
                description: rule.description,
                movies: pool.into_iter().take(COLLECTION_CAP).cloned().collect(),
            })
        })
        .collect()
}
