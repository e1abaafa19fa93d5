use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::scoring::{CriterionScore, InterpretationBand, Rating, ScoreResult};
use super::topics::Suggestion;

/// One rubric line as shown back to the respondent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionRow {
    pub criterion: String,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_label: Option<&'static str>,
    pub normalized: f64,
    pub weight: f64,
}

impl From<&CriterionScore> for CriterionRow {
    fn from(score: &CriterionScore) -> Self {
        Self {
            criterion: score.criterion.clone(),
            rating: score.rating,
            rating_label: Rating::from_value(score.rating).map(Rating::label),
            normalized: score.normalized,
            weight: score.weight,
        }
    }
}

/// Complete answer to an assessment request: index, interpretation and suggested activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub respondent: String,
    pub topic: String,
    pub index: f64,
    pub index_display: String,
    pub band: InterpretationBand,
    pub label: &'static str,
    pub criteria: Vec<CriterionRow>,
    pub suggestions: Vec<Suggestion>,
    pub generated_at: DateTime<Utc>,
}

impl AssessmentReport {
    pub fn new(
        respondent: impl Into<String>,
        topic: impl Into<String>,
        score: &ScoreResult,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        Self {
            respondent: respondent.into(),
            topic: topic.into(),
            index: score.index,
            index_display: format!("{:.3}", score.index),
            band: score.band,
            label: score.label(),
            criteria: score.criteria.iter().map(CriterionRow::from).collect(),
            suggestions,
            generated_at: Utc::now(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Respondent: {}", self.respondent);
        let _ = writeln!(out, "Topic: {}", self.topic);
        let _ = writeln!(out, "Generated at: {}", self.generated_at.to_rfc3339());
        let _ = writeln!(out);
        let _ = writeln!(out, "Criteria:");
        for row in &self.criteria {
            let label = row.rating_label.unwrap_or("?");
            let _ = writeln!(
                out,
                "  - {}: {} ({label}), weight {:.1}",
                row.criterion, row.rating, row.weight
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Civic contribution index: {}", self.index_display);
        let _ = writeln!(out, "{}", self.label);

        let _ = writeln!(out);
        if self.suggestions.is_empty() {
            let _ = writeln!(out, "No activities found for this topic.");
        } else {
            let _ = writeln!(out, "Suggested activities:");
            for suggestion in &self.suggestions {
                match suggestion.impact {
                    Some(impact) => {
                        let _ = writeln!(
                            out,
                            "  - {} [{}] impact {:.2}",
                            suggestion.activity, suggestion.topic, impact
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  - {} [{}]", suggestion.activity, suggestion.topic);
                    }
                }
            }
        }
        out
    }
}
