use serde::{Deserialize, Serialize};

/// Field a search result is ordered by
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Title,
    Year,
    Rating,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Structured filter applied by [`crate::services::search::search`]
///
/// Every field defaults, and the default spec matches every film.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Free text matched against titles and director names
    pub query: String,
    pub decades: Vec<i32>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub languages: Vec<String>,
    /// Inclusive `[min, max]`
    pub year_range: Option<(i32, i32)>,
    pub streamable_only: bool,
    pub min_rating: f64,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl FilterSpec {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = sort_direction;
        self
    }
}
