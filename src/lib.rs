//! In-memory query and recommendation engine for a catalog of public-domain
//! black-and-white films.
//!
//! The catalog is loaded once ([`store::Catalog`]) and borrowed by the pure
//! functions in [`services`]: search, similarity, recommendations, curated
//! collections and deterministic daily picks. The user's watch history lives
//! behind the [`store::CollectionStore`] capability.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod snapshot;
pub mod store;

pub use error::{CatalogError, CatalogResult};
