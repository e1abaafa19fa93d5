mod domain;
mod export;
mod impact;
mod matching;
mod seed;

pub use domain::{Suggestion, SuggestionResult, TopicEntry, TopicKey, TopicSnapshot, TopicView};
pub use export::{to_csv_string, write_csv};
pub use impact::{ImpactTable, DEFAULT_IMPACT};
pub use matching::{FuzzyMatcher, LiteralMatcher, MatchMode, TopicMatcher};
pub use seed::seed_topics;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use domain::normalize_keyword;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("topic name must not be empty")]
    EmptyTopic,
    #[error("contribution to '{topic}' has no keywords or activities")]
    EmptyContribution { topic: String },
}

/// What happens when a contribution names a topic that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionPolicy {
    /// Union keywords and append unseen activities.
    #[default]
    AppendDeduplicated,
    /// Overwrite the stored entry.
    Replace,
}

impl ContributionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "append" | "append_deduplicated" | "merge" => Some(Self::AppendDeduplicated),
            "replace" | "overwrite" => Some(Self::Replace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionConfig {
    pub mode: MatchMode,
    pub fuzzy_cutoff: f64,
    pub max_matches_per_token: usize,
    pub deduplicate: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Literal,
            fuzzy_cutoff: 0.3,
            max_matches_per_token: 2,
            deduplicate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionOutcome {
    pub topic: TopicKey,
    pub created: bool,
    pub keywords_added: usize,
    pub activities_added: usize,
}

/// Loaded topic bank plus the matching strategy used to query it.
pub struct TopicIndex {
    topics: TopicSnapshot,
    matchers: Vec<Box<dyn TopicMatcher>>,
    deduplicate: bool,
    contribution_policy: ContributionPolicy,
}

impl fmt::Debug for TopicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matchers: Vec<&str> = self.matchers.iter().map(|matcher| matcher.name()).collect();
        f.debug_struct("TopicIndex")
            .field("topics", &self.topics.len())
            .field("matchers", &matchers)
            .field("deduplicate", &self.deduplicate)
            .field("contribution_policy", &self.contribution_policy)
            .finish()
    }
}

impl TopicIndex {
    /// Seed entries overlaid with persisted ones; persisted entries win per key.
    pub fn load(seed: TopicSnapshot, persisted: Option<TopicSnapshot>) -> Self {
        Self::load_with(seed, persisted, &SuggestionConfig::default())
    }

    pub fn load_with(
        seed: TopicSnapshot,
        persisted: Option<TopicSnapshot>,
        config: &SuggestionConfig,
    ) -> Self {
        let mut topics = seed;
        if let Some(persisted) = persisted {
            topics.extend(persisted);
        }

        Self {
            topics,
            matchers: matching::matchers_for(
                config.mode,
                config.fuzzy_cutoff,
                config.max_matches_per_token,
            ),
            deduplicate: config.deduplicate,
            contribution_policy: ContributionPolicy::default(),
        }
    }

    pub fn with_contribution_policy(mut self, policy: ContributionPolicy) -> Self {
        self.contribution_policy = policy;
        self
    }

    /// Replaces the configured strategies with a single custom matcher.
    pub fn with_matcher(mut self, matcher: Box<dyn TopicMatcher>) -> Self {
        self.matchers = vec![matcher];
        self
    }

    pub fn contribution_policy(&self) -> ContributionPolicy {
        self.contribution_policy
    }

    /// Activities of every topic the query refers to, in key order.
    pub fn find(&self, query: &str) -> SuggestionResult {
        let query = query.trim().to_lowercase();

        let selected: BTreeSet<TopicKey> = self
            .matchers
            .iter()
            .flat_map(|matcher| matcher.select(&query, &self.topics))
            .collect();

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for key in selected {
            let Some(entry) = self.topics.get(&key) else {
                continue;
            };
            for activity in &entry.activities {
                if self.deduplicate && !seen.insert(activity.as_str()) {
                    continue;
                }
                suggestions.push(Suggestion {
                    topic: key.clone(),
                    activity: activity.clone(),
                    impact: None,
                });
            }
        }
        suggestions
    }

    pub fn contribute<K, A>(
        &mut self,
        topic: &str,
        keywords: K,
        activities: A,
    ) -> Result<ContributionOutcome, TopicError>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let key = TopicKey::new(topic);
        if key.is_empty() {
            return Err(TopicError::EmptyTopic);
        }

        let keywords: Vec<String> = keywords
            .into_iter()
            .filter_map(|keyword| normalize_keyword(keyword.as_ref()))
            .collect();
        let activities: Vec<String> = activities
            .into_iter()
            .map(|activity| activity.as_ref().trim().to_string())
            .filter(|activity| !activity.is_empty())
            .collect();
        if keywords.is_empty() && activities.is_empty() {
            return Err(TopicError::EmptyContribution {
                topic: key.to_string(),
            });
        }

        let created = !self.topics.contains_key(&key);
        let (keywords_added, activities_added) = match self.contribution_policy {
            ContributionPolicy::Replace => {
                let entry = TopicEntry::new(&keywords, &activities);
                let counts = (entry.keywords.len(), entry.activities.len());
                self.topics.insert(key.clone(), entry);
                counts
            }
            ContributionPolicy::AppendDeduplicated => {
                let entry = self.topics.entry(key.clone()).or_default();
                (entry.add_keywords(&keywords), entry.add_activities(&activities))
            }
        };

        Ok(ContributionOutcome {
            topic: key,
            created,
            keywords_added,
            activities_added,
        })
    }

    /// Adds entries for keys this index does not know yet; known keys are left untouched.
    pub fn absorb(&mut self, other: TopicSnapshot) -> usize {
        let mut absorbed = 0;
        for (key, entry) in other {
            if !self.topics.contains_key(&key) {
                self.topics.insert(key, entry);
                absorbed += 1;
            }
        }
        absorbed
    }

    pub fn snapshot(&self) -> TopicSnapshot {
        self.topics.clone()
    }

    /// Swaps the bank back to an earlier snapshot; matchers and policies are kept.
    pub fn restore(&mut self, snapshot: TopicSnapshot) {
        self.topics = snapshot;
    }

    pub fn topics(&self) -> Vec<TopicView> {
        self.topics
            .iter()
            .map(|(key, entry)| TopicView::from_entry(key, entry))
            .collect()
    }

    pub fn get(&self, topic: &str) -> Option<&TopicEntry> {
        self.topics.get(&TopicKey::new(topic))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
