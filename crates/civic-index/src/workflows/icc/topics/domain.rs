use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower-cased, trimmed topic name used as the bank key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TopicKey(String);

impl TopicKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TopicKey {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for TopicKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TopicKey> for String {
    fn from(value: TopicKey) -> Self {
        value.0
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trigger keywords and suggested activities for one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default, rename = "atividades", alias = "activities")]
    pub activities: Vec<String>,
}

impl TopicEntry {
    pub fn new<K, A>(keywords: K, activities: A) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let mut entry = Self::default();
        entry.add_keywords(keywords);
        entry.add_activities(activities);
        entry
    }

    /// Adds normalized keywords, returning how many were new.
    pub fn add_keywords<K>(&mut self, keywords: K) -> usize
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        keywords
            .into_iter()
            .filter_map(|keyword| normalize_keyword(keyword.as_ref()))
            .filter(|keyword| self.keywords.insert(keyword.clone()))
            .count()
    }

    /// Appends trimmed activities not already listed, returning how many were added.
    pub fn add_activities<A>(&mut self, activities: A) -> usize
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let mut added = 0;
        for activity in activities {
            let activity = activity.as_ref().trim();
            if activity.is_empty() || self.activities.iter().any(|known| known == activity) {
                continue;
            }
            self.activities.push(activity.to_string());
            added += 1;
        }
        added
    }
}

pub(crate) fn normalize_keyword(raw: &str) -> Option<String> {
    let keyword = raw.trim().to_lowercase();
    (!keyword.is_empty()).then_some(keyword)
}

/// Complete topic bank keyed by normalized topic; iteration is in key order.
pub type TopicSnapshot = BTreeMap<TopicKey, TopicEntry>;

/// One suggested activity and the topic that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub topic: TopicKey,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
}

pub type SuggestionResult = Vec<Suggestion>;

/// Flattened bank entry for listings and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicView {
    pub topic: String,
    pub keywords: Vec<String>,
    pub activities: Vec<String>,
}

impl TopicView {
    pub fn from_entry(key: &TopicKey, entry: &TopicEntry) -> Self {
        Self {
            topic: key.to_string(),
            keywords: entry.keywords.iter().cloned().collect(),
            activities: entry.activities.clone(),
        }
    }
}
