//! Catalog query and recommendation engine
//!
//! Every function here is a pure function of its borrowed inputs: no shared
//! state, no I/O, same inputs always give the same output. Callers re-invoke
//! them whenever the catalog, filter or watch history changes.

pub mod curation;
pub mod quiz;
pub mod recommendations;
pub mod search;
pub mod selection;
pub mod similarity;
pub mod stats;

pub use curation::{curated_collections, CuratedCollection};
pub use quiz::{quiz_match_score, quiz_matches, QuizMatch};
pub use recommendations::{recommend, similar, TasteProfile};
pub use search::search;
pub use selection::{daily_seed, featured, film_of_the_day, seeded_shuffle, SeededRng};
pub use similarity::{breakdown, score, SimilarityBreakdown};
pub use stats::{watch_stats, WatchStats};
