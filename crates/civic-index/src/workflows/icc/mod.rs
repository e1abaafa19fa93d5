//! Civic contribution index: rubric scoring, interpretation bands and the
//! collaborative topic bank that turns a theme into suggested classroom activities.

pub mod domain;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod topics;

#[cfg(test)]
mod tests;

pub use domain::{AssessmentRequest, CriterionResponse, RubricSubmission, TopicContribution};
pub use report::{AssessmentReport, CriterionRow};
pub use repository::{InMemoryTopicStore, JsonFileTopicStore, StoreError, TopicStore};
pub use router::icc_router;
pub use scoring::{
    compute_index, convert_rating, interpret, Criterion, InterpretationBand, Rating,
    RatingPolicy, Rubric, ScoreEngine, ScoreError, ScoreResult, WeightPolicy,
};
pub use service::{CurationCandidate, IccService, IccServiceError};
pub use topics::{
    ContributionOutcome, ContributionPolicy, ImpactTable, MatchMode, Suggestion,
    SuggestionConfig, TopicEntry, TopicError, TopicIndex, TopicKey, TopicSnapshot, TopicView,
};
