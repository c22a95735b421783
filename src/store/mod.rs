pub mod catalog;
pub mod collection;

pub use catalog::Catalog;
pub use collection::{Collection, CollectionStore, JsonFileStore, MemoryStore};
