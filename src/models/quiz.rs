use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A quiz answer: either "any" (no preference) or a concrete pick
#[derive(Debug, Clone, PartialEq)]
pub enum Answer<T> {
    Any,
    Pick(T),
}

impl<T> Default for Answer<T> {
    fn default() -> Self {
        Answer::Any
    }
}

impl<T> Answer<T> {
    pub fn pick(&self) -> Option<&T> {
        match self {
            Answer::Any => None,
            Answer::Pick(value) => Some(value),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Answer::Pick(_))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum AnyKeyword {
    Any,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer<T> {
    Any(AnyKeyword),
    Pick(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Answer<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAnswer::<T>::deserialize(deserializer)? {
            RawAnswer::Any(AnyKeyword::Any) => Answer::Any,
            RawAnswer::Pick(value) => Answer::Pick(value),
        })
    }
}

impl<T: Serialize> Serialize for Answer<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Answer::Any => serializer.serialize_str("any"),
            Answer::Pick(value) => value.serialize(serializer),
        }
    }
}

/// Production era buckets offered by the quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    /// Before 1930
    Silent,
    Thirties,
    Forties,
    Fifties,
    /// 1960 onwards
    Later,
}

impl Era {
    pub fn contains(&self, year: i32) -> bool {
        match self {
            Era::Silent => year < 1930,
            Era::Thirties => (1930..=1939).contains(&year),
            Era::Forties => (1940..=1949).contains(&year),
            Era::Fifties => (1950..=1959).contains(&year),
            Era::Later => year >= 1960,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Dark,
    Light,
    Thrilling,
    Thoughtful,
}

impl Mood {
    /// Lowercase genre keywords; a film matches when any genre contains one
    pub fn genre_keywords(&self) -> &'static [&'static str] {
        match self {
            Mood::Dark => &["noir", "crime", "horror", "thriller", "mystery"],
            Mood::Light => &["comedy", "musical", "romance", "family", "animation"],
            Mood::Thrilling => &["adventure", "action", "western", "war", "science fiction"],
            Mood::Thoughtful => &["drama", "history", "documentary", "biograph"],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    /// 7.0 and above
    Acclaimed,
    /// 6.0 and above
    Solid,
}

impl RatingTier {
    pub fn min_rating(&self) -> f64 {
        match self {
            RatingTier::Acclaimed => 7.0,
            RatingTier::Solid => 6.0,
        }
    }
}

/// Answers to the "what should I watch" quiz
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizAnswers {
    pub era: Answer<Era>,
    pub genre: Answer<String>,
    pub mood: Answer<Mood>,
    pub rating: Answer<RatingTier>,
    pub language: Answer<String>,
    pub streamable: Answer<bool>,
}

impl QuizAnswers {
    /// Number of criteria answered with a concrete value
    pub fn answered(&self) -> usize {
        [
            self.era.is_concrete(),
            self.genre.is_concrete(),
            self.mood.is_concrete(),
            self.rating.is_concrete(),
            self.language.is_concrete(),
            self.streamable.is_concrete(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}
