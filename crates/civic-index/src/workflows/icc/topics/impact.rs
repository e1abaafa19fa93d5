use std::cmp::Ordering;
use std::collections::HashMap;

use super::domain::Suggestion;

pub const DEFAULT_IMPACT: f64 = 0.5;

/// Estimated civic impact per activity, used to order suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactTable {
    scores: HashMap<String, f64>,
    fallback: f64,
}

impl Default for ImpactTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ImpactTable {
    pub fn new<I, S>(scores: I, fallback: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(activity, score)| (activity.into(), score))
                .collect(),
            fallback,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            [
                ("Roda de conversa sobre consentimento", 0.8),
                ("Oficina sobre saúde sexual", 0.7),
                ("Debate sobre gênero e respeito", 0.85),
                ("Projetos de horta escolar", 0.75),
                ("Campanhas de reciclagem", 0.65),
                ("Debates sobre mudanças climáticas", 0.7),
                ("Círculos de construção de paz", 0.9),
                ("Teatro do oprimido", 0.8),
                ("Mediação de conflitos", 0.85),
                ("Análise de fake news", 0.75),
                ("Oficina sobre segurança online", 0.7),
                ("Campanha contra cyberbullying", 0.8),
                ("Feira de culturas", 0.7),
                ("Exposição sobre identidades culturais", 0.75),
                ("Pesquisa de tradições familiares", 0.65),
            ],
            DEFAULT_IMPACT,
        )
    }

    pub fn impact_for(&self, activity: &str) -> f64 {
        self.scores.get(activity).copied().unwrap_or(self.fallback)
    }

    /// Annotates each suggestion with its impact and orders them highest first.
    /// Ties keep their incoming order.
    pub fn rank(&self, mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        for suggestion in &mut suggestions {
            suggestion.impact = Some(self.impact_for(&suggestion.activity));
        }
        suggestions.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));
        suggestions
    }
}
