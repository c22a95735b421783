use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::{
    error::{CatalogError, CatalogResult},
    models::UserCollection,
    store::Catalog,
};

/// Persistence capability for the user's collection
///
/// Implementations must survive a process restart (file store) or may live
/// only in memory (tests, previews).
#[cfg_attr(test, mockall::automock)]
pub trait CollectionStore {
    /// Reads the current collection; a store with nothing saved yields an empty one
    fn load(&self) -> CatalogResult<UserCollection>;

    fn save(&self, collection: &UserCollection) -> CatalogResult<()>;
}

/// Collection persisted as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self) -> CatalogResult<UserCollection> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No saved collection, starting empty");
            return Ok(UserCollection::new());
        }

        let json = std::fs::read_to_string(&self.path)?;
        let collection: UserCollection = serde_json::from_str(&json)?;

        tracing::info!(
            path = %self.path.display(),
            watched = collection.watched.len(),
            watchlist = collection.watchlist.len(),
            favorites = collection.favorites.len(),
            "Loaded collection"
        );

        Ok(collection)
    }

    /// Replaces the file atomically through a temp file in the same directory
    fn save(&self, collection: &UserCollection) -> CatalogResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(collection)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), "Saved collection");
        Ok(())
    }
}

/// In-memory store, used for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<UserCollection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(collection: UserCollection) -> Self {
        Self {
            saved: Mutex::new(collection),
        }
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> CatalogResult<UserCollection> {
        let saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        Ok(saved.clone())
    }

    fn save(&self, collection: &UserCollection) -> CatalogResult<()> {
        let mut saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        *saved = collection.clone();
        Ok(())
    }
}

/// A user collection bound to its store, persisted after every mutation
#[derive(Debug)]
pub struct Collection<S: CollectionStore> {
    store: S,
    state: UserCollection,
}

impl<S: CollectionStore> Collection<S> {
    /// Loads the current state from the store
    pub fn open(store: S) -> CatalogResult<Self> {
        let state = store.load()?;
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &UserCollection {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mark_watched(
        &mut self,
        catalog: &Catalog,
        movie_id: &str,
        user_rating: Option<u8>,
        watched_at: DateTime<Utc>,
    ) -> CatalogResult<()> {
        ensure_known(catalog, movie_id)?;
        self.commit(|state| state.mark_watched(movie_id, user_rating, watched_at))
    }

    pub fn unmark_watched(&mut self, movie_id: &str) -> CatalogResult<bool> {
        self.commit_if_changed(|state| state.unmark_watched(movie_id))
    }

    pub fn add_to_watchlist(&mut self, catalog: &Catalog, movie_id: &str) -> CatalogResult<()> {
        ensure_known(catalog, movie_id)?;
        self.commit(|state| state.add_to_watchlist(movie_id))
    }

    pub fn remove_from_watchlist(&mut self, movie_id: &str) -> CatalogResult<bool> {
        self.commit_if_changed(|state| state.remove_from_watchlist(movie_id))
    }

    pub fn toggle_favorite(&mut self, catalog: &Catalog, movie_id: &str) -> CatalogResult<bool> {
        ensure_known(catalog, movie_id)?;
        self.commit(|state| state.toggle_favorite(movie_id))
    }

    /// Applies `change` to a copy and adopts it only once the store accepted it
    fn commit<T>(&mut self, change: impl FnOnce(&mut UserCollection) -> T) -> CatalogResult<T> {
        let mut next = self.state.clone();
        let outcome = change(&mut next);
        self.store.save(&next)?;
        self.state = next;
        Ok(outcome)
    }

    /// Like [`Self::commit`], but skips the save when nothing changed
    fn commit_if_changed(
        &mut self,
        change: impl FnOnce(&mut UserCollection) -> bool,
    ) -> CatalogResult<bool> {
        let mut next = self.state.clone();
        if !change(&mut next) {
            return Ok(false);
        }
        self.store.save(&next)?;
        self.state = next;
        Ok(true)
    }
}

fn ensure_known(catalog: &Catalog, movie_id: &str) -> CatalogResult<()> {
    if catalog.contains(movie_id) {
        Ok(())
    } else {
        Err(CatalogError::UnknownFilm(movie_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogMeta, Film};
    use chrono::TimeZone;

    fn film(id: &str) -> Film {
        Film {
            id: id.to_string(),
            title: format!("Film {}", id),
            year: 1940,
            poster_url: None,
            tmdb_id: None,
            imdb_id: None,
            internet_archive_id: None,
            youtube_id: None,
            vote_average: 7.0,
            genres: vec!["Drama".to_string()],
            directors: vec![],
            language: None,
            is_streamable: false,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(CatalogMeta::default(), vec![film("Q1"), film("Q2")]).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 21, 30, 0).unwrap()
    }

    #[test]
    fn test_mutation_persists() {
        let mut store = MockCollectionStore::new();
        store.expect_load().times(1).returning(|| Ok(UserCollection::new()));
        store
            .expect_save()
            .withf(|c: &UserCollection| c.is_watched("Q1"))
            .times(1)
            .returning(|_| Ok(()));

        let mut collection = Collection::open(store).unwrap();
        collection.mark_watched(&catalog(), "Q1", Some(8), now()).unwrap();
        assert!(collection.state().is_watched("Q1"));
    }

    #[test]
    fn test_unknown_film_not_persisted() {
        let mut store = MockCollectionStore::new();
        store.expect_load().returning(|| Ok(UserCollection::new()));
        store.expect_save().never();

        let mut collection = Collection::open(store).unwrap();
        let result = collection.add_to_watchlist(&catalog(), "Q404");
        assert!(matches!(result, Err(CatalogError::UnknownFilm(id)) if id == "Q404"));
        assert!(collection.state().watchlist.is_empty());
    }

    #[test]
    fn test_noop_removal_skips_save() {
        let mut store = MockCollectionStore::new();
        store.expect_load().returning(|| Ok(UserCollection::new()));
        store.expect_save().never();

        let mut collection = Collection::open(store).unwrap();
        assert!(!collection.unmark_watched("Q1").unwrap());
        assert!(!collection.remove_from_watchlist("Q1").unwrap());
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let mut initial = UserCollection::new();
        initial.add_to_watchlist("Q2");
        let expected = initial.clone();

        let mut store = MockCollectionStore::new();
        store.expect_load().returning(move || Ok(initial.clone()));
        store
            .expect_save()
            .times(3)
            .returning(|_| Err(CatalogError::Io(std::io::Error::other("disk full"))));

        let catalog = catalog();
        let mut collection = Collection::open(store).unwrap();

        assert!(matches!(
            collection.mark_watched(&catalog, "Q1", Some(7), now()),
            Err(CatalogError::Io(_))
        ));
        assert!(collection.toggle_favorite(&catalog, "Q1").is_err());
        assert!(collection.remove_from_watchlist("Q2").is_err());

        assert!(!collection.state().is_watched("Q1"));
        assert!(!collection.state().is_favorite("Q1"));
        assert_eq!(collection.state(), &expected);
    }

    #[test]
    fn test_memory_store_round_trip_through_collection() {
        let catalog = catalog();
        let mut collection = Collection::open(MemoryStore::new()).unwrap();
        collection.add_to_watchlist(&catalog, "Q2").unwrap();
        assert!(collection.toggle_favorite(&catalog, "Q1").unwrap());

        let saved = collection.store().load().unwrap();
        assert_eq!(saved.watchlist, vec!["Q2".to_string()]);
        assert_eq!(saved.favorites, vec!["Q1".to_string()]);
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("collection.json"));
        assert_eq!(store.load().unwrap(), UserCollection::new());
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("collection.json");
        let catalog = catalog();

        let mut collection = Collection::open(JsonFileStore::new(&path)).unwrap();
        collection.mark_watched(&catalog, "Q1", Some(9), now()).unwrap();
        collection.add_to_watchlist(&catalog, "Q2").unwrap();
        drop(collection);

        let reopened = Collection::open(JsonFileStore::new(&path)).unwrap();
        assert!(reopened.state().is_watched("Q1"));
        assert_eq!(reopened.state().watched[0].user_rating, Some(9));
        assert_eq!(reopened.state().watched[0].watched_at, now());
        assert_eq!(reopened.state().watchlist, vec!["Q2".to_string()]);
    }

    #[test]
    fn test_json_file_store_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        let store = JsonFileStore::new(&path);

        let mut first = UserCollection::new();
        first.add_to_watchlist("Q1");
        store.save(&first).unwrap();

        let mut second = UserCollection::new();
        second.toggle_favorite("Q2");
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }
}
