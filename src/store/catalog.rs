use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::{
    error::{CatalogError, CatalogResult},
    models::{CatalogDocument, CatalogMeta, Film},
};

/// Loaded catalog snapshot
///
/// Read-only for the rest of the session: every engine function borrows
/// [`Catalog::films`] and never mutates it.
#[derive(Debug, Clone)]
pub struct Catalog {
    meta: CatalogMeta,
    films: Vec<Film>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from already-parsed films
    ///
    /// Film ids are the only join key, so duplicates are rejected.
    pub fn new(meta: CatalogMeta, films: Vec<Film>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(films.len());
        for (index, film) in films.iter().enumerate() {
            if by_id.insert(film.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(film.id.clone()));
            }
        }

        Ok(Self { meta, films, by_id })
    }

    /// Parses a `{ meta, movies }` document
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.meta, document.movies)
    }

    /// Reads and parses a catalog snapshot from disk
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            streamable = catalog.streamable().count(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    pub fn meta(&self) -> &CatalogMeta {
        &self.meta
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Film> {
        self.by_id.get(id).map(|&index| &self.films[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn streamable(&self) -> impl Iterator<Item = &Film> {
        self.films.iter().filter(|f| f.is_streamable)
    }

    /// Distinct non-null languages, sorted, for the language filter
    pub fn languages(&self) -> Vec<String> {
        self.films
            .iter()
            .filter_map(|f| f.language.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG_JSON: &str = r#"{
        "meta": {
            "decades": [{"decade": 1920, "count": 1}, {"decade": 1940, "count": 1}],
            "genres": [{"name": "Horror", "count": 1}, {"name": "Drama", "count": 1}],
            "topDirectors": [{"name": "F. W. Murnau", "count": 1}],
            "totalMovies": 3,
            "generatedAt": "2024-05-01T12:00:00Z"
        },
        "movies": [
            {"id": "Q1", "title": "Casablanca", "year": 1942, "voteAverage": 8.5,
             "genres": ["Drama"], "directors": ["Michael Curtiz"], "language": "English"},
            {"id": "Q2", "title": "Nosferatu", "year": 1922, "voteAverage": 7.9,
             "genres": ["Horror"], "directors": ["F. W. Murnau"], "language": "German",
             "internetArchiveId": "nosferatu_1922", "isStreamable": true},
            {"id": "Q3", "title": "The General", "year": 1926,
             "genres": ["Comedy"], "directors": ["Buster Keaton"], "isStreamable": true}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.meta().total_movies, Some(3));
        assert_eq!(catalog.meta().top_directors[0].name, "F. W. Murnau");
        assert!(catalog.meta().generated_at.is_some());
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.find("Q2").map(|f| f.title.as_str()), Some("Nosferatu"));
        assert!(catalog.find("Q404").is_none());
        assert!(catalog.contains("Q3"));
    }

    #[test]
    fn test_missing_language_normalized_to_none() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let general = catalog.find("Q3").unwrap();
        assert!(general.language.is_none());
        assert!(!general.is_rated());
    }

    #[test]
    fn test_languages_sorted_and_distinct() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.languages(), vec!["English".to_string(), "German".to_string()]);
    }

    #[test]
    fn test_streamable() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let ids: Vec<&str> = catalog.streamable().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["Q2", "Q3"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{"movies": [
            {"id": "Q1", "title": "A", "year": 1940},
            {"id": "Q1", "title": "B", "year": 1941}
        ]}"#;
        let result = Catalog::from_json(json);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "Q1"));
    }

    #[test]
    fn test_missing_meta_defaults() {
        let json = r#"{"movies": []}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.meta(), &CatalogMeta::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
