use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Catalog snapshot (`{ meta, movies }`) produced by the ingestion pipeline
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// JSON file holding the user's watched films, watchlist and favorites
    #[serde(default = "default_collection_path")]
    pub collection_path: PathBuf,

    /// Maximum number of personalized recommendations
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Maximum number of "you might also like" films
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,

    /// Length of the date-shuffled discover row
    #[serde(default = "default_discover_limit")]
    pub discover_limit: usize,

    /// Optional free-text search included in the snapshot
    #[serde(default)]
    pub search_query: Option<String>,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_collection_path() -> PathBuf {
    PathBuf::from("data/collection.json")
}

fn default_recommendation_limit() -> usize {
    12
}

fn default_similar_limit() -> usize {
    8
}

fn default_discover_limit() -> usize {
    12
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
