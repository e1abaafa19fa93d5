use serde::{Deserialize, Serialize};

use super::ScoreError;

/// One of the four admissible answers for a rubric criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Insufficient,
    Regular,
    Good,
    Excellent,
}

impl Rating {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Excellent,
            Self::Good,
            Self::Regular,
            Self::Insufficient,
        ]
    }

    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            4 => Some(Self::Excellent),
            3 => Some(Self::Good),
            2 => Some(Self::Regular),
            1 => Some(Self::Insufficient),
            _ => None,
        }
    }

    pub const fn value(self) -> i64 {
        match self {
            Self::Excellent => 4,
            Self::Good => 3,
            Self::Regular => 2,
            Self::Insufficient => 1,
        }
    }

    pub const fn normalized(self) -> f64 {
        match self {
            Self::Excellent => 1.0,
            Self::Good => 0.75,
            Self::Regular => 0.5,
            Self::Insufficient => 0.25,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Bom",
            Self::Regular => "Regular",
            Self::Insufficient => "Insuficiente",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(ScoreError::InvalidRating { rating: value })
    }
}

/// How ratings outside `1..=4` are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingPolicy {
    /// Unknown ratings fail the whole computation.
    #[default]
    Strict,
    /// Unknown ratings contribute 0.0.
    Lenient,
}

impl RatingPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }

    pub fn convert(self, rating: i64) -> Result<f64, ScoreError> {
        match self {
            Self::Strict => convert_rating(rating),
            Self::Lenient => Ok(Rating::from_value(rating).map_or(0.0, Rating::normalized)),
        }
    }
}

/// Maps a raw rating to its normalized value, rejecting anything outside `1..=4`.
pub fn convert_rating(rating: i64) -> Result<f64, ScoreError> {
    Rating::try_from(rating).map(Rating::normalized)
}
