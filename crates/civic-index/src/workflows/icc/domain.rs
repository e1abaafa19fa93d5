use serde::{Deserialize, Serialize};

use super::scoring::Rubric;

/// A single rubric answer as collected by the form: raw rating plus optional weight override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResponse {
    pub criterion: String,
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Ratings for some or all criteria of a rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RubricSubmission {
    pub responses: Vec<CriterionResponse>,
}

impl RubricSubmission {
    /// Pairs ratings (and optional weights) with the rubric's criteria in order.
    ///
    /// Extra values beyond the rubric length are ignored; missing weights fall back to
    /// the rubric defaults.
    pub fn from_ordered(rubric: &Rubric, ratings: &[i64], weights: &[f64]) -> Self {
        let responses = rubric
            .criteria()
            .iter()
            .zip(ratings)
            .enumerate()
            .map(|(position, (criterion, rating))| CriterionResponse {
                criterion: criterion.name.clone(),
                rating: *rating,
                weight: weights.get(position).copied(),
            })
            .collect();

        Self { responses }
    }
}

/// Everything the form sends when the respondent asks for their index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub respondent: String,
    pub topic: String,
    #[serde(flatten)]
    pub submission: RubricSubmission,
}

/// A user-submitted topic with trigger keywords and suggested activities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContribution {
    pub topic: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, alias = "atividades")]
    pub activities: Vec<String>,
}

impl TopicContribution {
    /// Splits the free-text inputs used by the "feed the bank" form:
    /// comma-separated keywords and one activity per line.
    pub fn from_form(topic: &str, keywords: &str, activities: &str) -> Self {
        Self {
            topic: topic.to_string(),
            keywords: keywords
                .split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_string)
                .collect(),
            activities: activities
                .lines()
                .map(str::trim)
                .filter(|activity| !activity.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}
