use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::IccConfig;
use crate::workflows::icc::domain::{AssessmentRequest, RubricSubmission};
use crate::workflows::icc::repository::{InMemoryTopicStore, StoreError, TopicStore};
use crate::workflows::icc::scoring::Rubric;
use crate::workflows::icc::topics::{TopicEntry, TopicKey, TopicSnapshot};
use crate::workflows::icc::{icc_router, IccService};

pub(super) fn ratings(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
    pairs
        .iter()
        .map(|(criterion, rating)| (criterion.to_string(), *rating))
        .collect()
}

pub(super) fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs
        .iter()
        .map(|(criterion, weight)| (criterion.to_string(), *weight))
        .collect()
}

pub(super) fn snapshot(entries: &[(&str, &[&str], &[&str])]) -> TopicSnapshot {
    entries
        .iter()
        .map(|(topic, keywords, activities)| {
            (
                TopicKey::new(topic),
                TopicEntry::new(keywords.iter(), activities.iter()),
            )
        })
        .collect()
}

pub(super) fn activities(suggestions: &[crate::workflows::icc::Suggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .map(|suggestion| suggestion.activity.as_str())
        .collect()
}

/// Every criterion of the standard rubric rated with the same value.
pub(super) fn uniform_submission(rating: i64) -> RubricSubmission {
    let rubric = Rubric::standard();
    RubricSubmission::from_ordered(&rubric, &vec![rating; rubric.len()], &[])
}

pub(super) fn request(respondent: &str, topic: &str, rating: i64) -> AssessmentRequest {
    AssessmentRequest {
        respondent: respondent.to_string(),
        topic: topic.to_string(),
        submission: uniform_submission(rating),
    }
}

pub(super) fn build_service() -> (IccService<InMemoryTopicStore>, Arc<InMemoryTopicStore>) {
    build_service_with(IccConfig::default())
}

pub(super) fn build_service_with(
    config: IccConfig,
) -> (IccService<InMemoryTopicStore>, Arc<InMemoryTopicStore>) {
    let store = Arc::new(InMemoryTopicStore::default());
    let service = IccService::open(store.clone(), &config).expect("service opens");
    (service, store)
}

pub(super) struct ReadOnlyStore;

impl TopicStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<TopicSnapshot>, StoreError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &TopicSnapshot) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(super) fn router_with_service<S>(service: IccService<S>) -> axum::Router
where
    S: TopicStore + 'static,
{
    icc_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
