mod band;
mod rating;
mod rubric;

pub use band::{interpret, InterpretationBand};
pub use rating::{convert_rating, Rating, RatingPolicy};
pub use rubric::{Criterion, Rubric, WeightPolicy};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::domain::RubricSubmission;

/// Validation and arithmetic failures raised while scoring a rubric response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("rating {rating} is not one of 1, 2, 3 or 4")]
    InvalidRating { rating: i64 },
    #[error("submission has no criteria or every weight is zero")]
    EmptyRubric,
    #[error("index {index} lies outside [0, 1]")]
    OutOfRange { index: f64 },
    #[error("ratings and weights cover different criteria (unweighted: {unweighted:?}, unrated: {unrated:?})")]
    MismatchedCriteria {
        unweighted: Vec<String>,
        unrated: Vec<String>,
    },
    #[error("weight {weight} for '{criterion}' must be a finite, non-negative number")]
    InvalidWeight { criterion: String, weight: f64 },
    #[error("weight {weight} for '{criterion}' is outside the allowed range {min}..={max}")]
    WeightOutOfBounds {
        criterion: String,
        weight: f64,
        min: f64,
        max: f64,
    },
    #[error("weights add up to {actual:.2} but must total {expected:.2}")]
    WeightTotalMismatch { expected: f64, actual: f64 },
    #[error("'{criterion}' is not part of the rubric")]
    UnknownCriterion { criterion: String },
    #[error("'{criterion}' appears more than once")]
    DuplicateCriterion { criterion: String },
}

/// Weighted mean of normalized ratings over a shared criterion set.
///
/// Summation runs in sorted key order so equal inputs always give bit-identical output.
pub fn compute_index(
    ratings: &BTreeMap<String, i64>,
    weights: &BTreeMap<String, f64>,
) -> Result<f64, ScoreError> {
    compute_index_with(RatingPolicy::Strict, ratings, weights)
}

pub(crate) fn compute_index_with(
    policy: RatingPolicy,
    ratings: &BTreeMap<String, i64>,
    weights: &BTreeMap<String, f64>,
) -> Result<f64, ScoreError> {
    let rated: BTreeSet<&String> = ratings.keys().collect();
    let weighted: BTreeSet<&String> = weights.keys().collect();
    if rated != weighted {
        return Err(ScoreError::MismatchedCriteria {
            unweighted: rated.difference(&weighted).map(|k| k.to_string()).collect(),
            unrated: weighted.difference(&rated).map(|k| k.to_string()).collect(),
        });
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (criterion, rating) in ratings {
        let weight = weights[criterion];
        if !weight.is_finite() || weight < 0.0 {
            return Err(ScoreError::InvalidWeight {
                criterion: criterion.clone(),
                weight,
            });
        }
        numerator += policy.convert(*rating)? * weight;
        denominator += weight;
    }

    if denominator <= 0.0 {
        return Err(ScoreError::EmptyRubric);
    }

    Ok(numerator / denominator)
}

/// Per-criterion line of a scored submission, in rubric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub rating: i64,
    pub normalized: f64,
    pub weight: f64,
}

/// Derived result of a scoring run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub index: f64,
    pub band: InterpretationBand,
    pub total_weight: f64,
    pub criteria: Vec<CriterionScore>,
}

impl ScoreResult {
    pub fn label(&self) -> &'static str {
        self.band.label()
    }
}

/// Stateless evaluator that applies a rubric and its policies to a submission.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    rubric: Rubric,
    rating_policy: RatingPolicy,
    weight_policy: WeightPolicy,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(
            Rubric::standard(),
            RatingPolicy::default(),
            WeightPolicy::default(),
        )
    }
}

impl ScoreEngine {
    pub fn new(rubric: Rubric, rating_policy: RatingPolicy, weight_policy: WeightPolicy) -> Self {
        Self {
            rubric,
            rating_policy,
            weight_policy,
        }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn rating_policy(&self) -> RatingPolicy {
        self.rating_policy
    }

    pub fn weight_policy(&self) -> &WeightPolicy {
        &self.weight_policy
    }

    pub fn score(&self, submission: &RubricSubmission) -> Result<ScoreResult, ScoreError> {
        if submission.responses.is_empty() {
            return Err(ScoreError::EmptyRubric);
        }

        let mut ratings = BTreeMap::new();
        let mut weights = BTreeMap::new();

        for response in &submission.responses {
            let criterion = self.rubric.criterion(&response.criterion).ok_or_else(|| {
                ScoreError::UnknownCriterion {
                    criterion: response.criterion.clone(),
                }
            })?;

            let weight = response.weight.unwrap_or(criterion.default_weight);
            self.weight_policy.check(&criterion.name, weight)?;

            if ratings
                .insert(criterion.name.clone(), response.rating)
                .is_some()
            {
                return Err(ScoreError::DuplicateCriterion {
                    criterion: criterion.name.clone(),
                });
            }
            weights.insert(criterion.name.clone(), weight);
        }

        let total_weight: f64 = weights.values().sum();
        self.weight_policy.check_total(total_weight)?;

        let index = compute_index_with(self.rating_policy, &ratings, &weights)?;
        let band = interpret(index)?;

        let mut criteria = Vec::with_capacity(ratings.len());
        for criterion in self.rubric.criteria() {
            if let (Some(&rating), Some(&weight)) =
                (ratings.get(&criterion.name), weights.get(&criterion.name))
            {
                criteria.push(CriterionScore {
                    criterion: criterion.name.clone(),
                    rating,
                    normalized: self.rating_policy.convert(rating)?,
                    weight,
                });
            }
        }

        Ok(ScoreResult {
            index,
            band,
            total_weight,
            criteria,
        })
    }
}
