use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::IccConfig;

use super::domain::{AssessmentRequest, TopicContribution};
use super::report::AssessmentReport;
use super::repository::{StoreError, TopicStore};
use super::scoring::{Rubric, ScoreEngine, ScoreError, WeightPolicy};
use super::topics::{
    seed_topics, ContributionOutcome, ImpactTable, SuggestionResult, TopicError, TopicIndex,
    TopicSnapshot, TopicView,
};

/// Generic activity offered for each rubric criterion when curating the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationCandidate {
    pub criterion: String,
    pub activity: String,
}

/// Service composing the score engine, the topic index and its backing store.
pub struct IccService<S> {
    engine: ScoreEngine,
    index: Mutex<TopicIndex>,
    impacts: ImpactTable,
    store: Arc<S>,
}

impl<S> IccService<S>
where
    S: TopicStore + 'static,
{
    /// Loads the seed bank overlaid with whatever the store already holds.
    pub fn open(store: Arc<S>, config: &IccConfig) -> Result<Self, IccServiceError> {
        let persisted = store.load()?;
        let index = TopicIndex::load_with(seed_topics(), persisted, &config.suggestions)
            .with_contribution_policy(config.contribution_policy);
        let engine = ScoreEngine::new(
            Rubric::standard(),
            config.rating_policy,
            WeightPolicy::default(),
        );

        info!(
            topics = index.len(),
            mode = ?config.suggestions.mode,
            rating_policy = ?config.rating_policy,
            "icc service ready"
        );
        Ok(Self::from_parts(engine, index, ImpactTable::standard(), store))
    }

    pub fn from_parts(
        engine: ScoreEngine,
        index: TopicIndex,
        impacts: ImpactTable,
        store: Arc<S>,
    ) -> Self {
        Self {
            engine,
            index: Mutex::new(index),
            impacts,
            store,
        }
    }

    /// Scores the rubric and attaches ranked activities for the requested topic.
    pub fn assess(&self, request: AssessmentRequest) -> Result<AssessmentReport, IccServiceError> {
        let respondent = request.respondent.trim();
        if respondent.is_empty() {
            return Err(IccServiceError::MissingField("respondent"));
        }
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(IccServiceError::MissingField("topic"));
        }

        let score = self.engine.score(&request.submission)?;
        let suggestions = self.suggest(topic)?;

        info!(
            index = score.index,
            band = ?score.band,
            suggestions = suggestions.len(),
            "assessment scored"
        );
        Ok(AssessmentReport::new(respondent, topic, &score, suggestions))
    }

    /// Matching activities ordered by estimated impact.
    pub fn suggest(&self, topic: &str) -> Result<SuggestionResult, IccServiceError> {
        let found = self.lock_index()?.find(topic);
        Ok(self.impacts.rank(found))
    }

    /// Applies a contribution and writes the merged bank back to the store.
    ///
    /// The in-memory bank only keeps the contribution once the store accepted it.
    pub fn contribute(
        &self,
        contribution: TopicContribution,
    ) -> Result<ContributionOutcome, IccServiceError> {
        let mut index = self.lock_index()?;
        let previous = index.snapshot();
        let outcome = index.contribute(
            &contribution.topic,
            &contribution.keywords,
            &contribution.activities,
        )?;
        if let Err(error) = self.persist_locked(&mut index) {
            index.restore(previous);
            warn!(topic = %outcome.topic, %error, "topic contribution rolled back");
            return Err(error);
        }

        info!(
            topic = %outcome.topic,
            created = outcome.created,
            activities_added = outcome.activities_added,
            "topic contribution stored"
        );
        Ok(outcome)
    }

    /// Re-reads the store, absorbs topics other writers added, then saves the merged bank.
    ///
    /// Topics known in memory overwrite their stored copy. Nothing coordinates separate
    /// processes, so concurrent writers race and the last save wins.
    pub fn persist(&self) -> Result<usize, IccServiceError> {
        let mut index = self.lock_index()?;
        self.persist_locked(&mut index)
    }

    fn persist_locked(&self, index: &mut TopicIndex) -> Result<usize, IccServiceError> {
        if let Some(on_disk) = self.store.load()? {
            let absorbed = index.absorb(on_disk);
            if absorbed > 0 {
                warn!(absorbed, "absorbed topics written by another process");
            }
        }
        let snapshot = index.snapshot();
        self.store.save(&snapshot)?;
        Ok(snapshot.len())
    }

    pub fn topics(&self) -> Result<Vec<TopicView>, IccServiceError> {
        Ok(self.lock_index()?.topics())
    }

    pub fn snapshot(&self) -> Result<TopicSnapshot, IccServiceError> {
        Ok(self.lock_index()?.snapshot())
    }

    pub fn rubric(&self) -> &Rubric {
        self.engine.rubric()
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub fn curation_candidates(&self) -> Vec<CurationCandidate> {
        self.rubric()
            .criteria()
            .iter()
            .map(|criterion| CurationCandidate {
                criterion: criterion.name.clone(),
                activity: criterion.generic_activity.clone(),
            })
            .collect()
    }

    fn lock_index(&self) -> Result<MutexGuard<'_, TopicIndex>, IccServiceError> {
        self.index.lock().map_err(|_| IccServiceError::PoisonedLock)
    }
}

/// Error raised by the ICC service.
#[derive(Debug, thiserror::Error)]
pub enum IccServiceError {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("topic index lock poisoned")]
    PoisonedLock,
}
