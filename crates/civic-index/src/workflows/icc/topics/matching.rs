use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{TopicKey, TopicSnapshot};

/// How free-text queries are matched against the topic bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword or topic name appears verbatim in the query.
    #[default]
    Literal,
    /// Query tokens are close to a topic name by edit distance.
    Fuzzy,
    /// Union of literal and fuzzy matches.
    Hybrid,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "literal" | "substring" => Some(Self::Literal),
            "fuzzy" => Some(Self::Fuzzy),
            "hybrid" | "both" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// Selects the topics a lower-cased query refers to.
pub trait TopicMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn select(&self, query: &str, topics: &TopicSnapshot) -> BTreeSet<TopicKey>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralMatcher;

impl TopicMatcher for LiteralMatcher {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn select(&self, query: &str, topics: &TopicSnapshot) -> BTreeSet<TopicKey> {
        topics
            .iter()
            .filter(|(key, entry)| {
                query.contains(key.as_str())
                    || entry
                        .keywords
                        .iter()
                        .any(|keyword| !keyword.is_empty() && query.contains(keyword.as_str()))
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// Per-token nearest-topic lookup using normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    cutoff: f64,
    max_per_token: usize,
}

impl FuzzyMatcher {
    pub fn new(cutoff: f64, max_per_token: usize) -> Self {
        Self {
            cutoff,
            max_per_token,
        }
    }

    fn closest<'a>(&self, token: &str, topics: &'a TopicSnapshot) -> Vec<&'a TopicKey> {
        let mut scored: Vec<(f64, &TopicKey)> = topics
            .keys()
            .map(|key| (strsim::normalized_levenshtein(token, key.as_str()), key))
            .filter(|(similarity, _)| *similarity >= self.cutoff)
            .collect();

        // Stable sort keeps key order among equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(self.max_per_token)
            .map(|(_, key)| key)
            .collect()
    }
}

impl TopicMatcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn select(&self, query: &str, topics: &TopicSnapshot) -> BTreeSet<TopicKey> {
        query
            .split_whitespace()
            .flat_map(|token| self.closest(token, topics))
            .cloned()
            .collect()
    }
}

pub(crate) fn matchers_for(
    mode: MatchMode,
    cutoff: f64,
    max_per_token: usize,
) -> Vec<Box<dyn TopicMatcher>> {
    match mode {
        MatchMode::Literal => vec![Box::new(LiteralMatcher)],
        MatchMode::Fuzzy => vec![Box::new(FuzzyMatcher::new(cutoff, max_per_token))],
        MatchMode::Hybrid => vec![
            Box::new(LiteralMatcher),
            Box::new(FuzzyMatcher::new(cutoff, max_per_token)),
        ],
    }
}
