use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    models::{FilterSpec, Film, UserCollection},
    services::{self, CuratedCollection, WatchStats},
    store::Catalog,
};

/// Limits applied when assembling a snapshot
#[derive(Debug, Clone, Copy)]
pub struct SnapshotLimits {
    pub recommendations: usize,
    pub similar: usize,
    pub discover: usize,
}

/// Everything the home and profile pages render, computed in one pass
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSnapshot {
    pub date: NaiveDate,
    pub catalog_size: usize,
    pub film_of_the_day: Option<Film>,
    /// "You might also like" for the film of the day
    pub similar_to_film_of_the_day: Vec<Film>,
    pub featured: Vec<Film>,
    /// Date-seeded shuffle of the streamable catalog
    pub discover: Vec<Film>,
    pub collections: Vec<CuratedCollection>,
    pub recommendations: Vec<Film>,
    pub stats: WatchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<Film>>,
}

impl HomeSnapshot {
    pub fn build(
        catalog: &Catalog,
        collection: &UserCollection,
        today: NaiveDate,
        limits: SnapshotLimits,
        query: Option<&str>,
    ) -> Self {
        let films = catalog.films();
        let film_of_the_day = services::film_of_the_day(films, today);
        let similar_to_film_of_the_day = film_of_the_day
            .as_ref()
            .map(|film| services::similar(film, films, limits.similar))
            .unwrap_or_default();

        let streamable: Vec<Film> = catalog.streamable().cloned().collect();
        let discover = services::seeded_shuffle(&streamable, services::daily_seed(today))
            .into_iter()
            .take(limits.discover)
            .collect();

        let search = query.map(|q| services::search(films, &FilterSpec::with_query(q)));

        Self {
            date: today,
            catalog_size: catalog.len(),
            film_of_the_day,
            similar_to_film_of_the_day,
            featured: services::featured(films),
            discover,
            collections: services::curated_collections(films),
            recommendations: services::recommend(films, &collection.watched_ids(), limits.recommendations),
            stats: services::watch_stats(films, &collection.watched),
            search,
        }
    }
}
