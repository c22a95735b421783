/// Errors raised at the I/O edges of the catalog (loading, persistence)
///
/// The query and scoring functions never return these: they resolve to empty
/// vectors, `None` or zero scores instead.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate film id in catalog: {0}")]
    DuplicateId(String),

    #[error("Unknown film id: {0}")]
    UnknownFilm(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
