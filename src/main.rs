use chrono::Utc;
use tracing_subscriber::EnvFilter;

use monochrome::{
    config::Config,
    snapshot::{HomeSnapshot, SnapshotLimits},
    store::{Catalog, Collection, JsonFileStore},
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let catalog = Catalog::load(&config.catalog_path)?;
    let collection = Collection::open(JsonFileStore::new(&config.collection_path))?;

    let today = Utc::now().date_naive();
    let limits = SnapshotLimits {
        recommendations: config.recommendation_limit,
        similar: config.similar_limit,
        discover: config.discover_limit,
    };

    let snapshot = HomeSnapshot::build(
        &catalog,
        collection.state(),
        today,
        limits,
        config.search_query.as_deref(),
    );

    tracing::info!(
        date = %today,
        collections = snapshot.collections.len(),
        recommendations = snapshot.recommendations.len(),
        "Snapshot ready"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
