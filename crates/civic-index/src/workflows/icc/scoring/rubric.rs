use serde::{Deserialize, Serialize};

use super::ScoreError;

const TOTAL_TOLERANCE: f64 = 1e-9;

/// A rubric dimension with its default weight and the generic activity offered for curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub default_weight: f64,
    pub generic_activity: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>, default_weight: f64, generic_activity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_weight,
            generic_activity: generic_activity.into(),
        }
    }
}

/// Ordered, immutable set of criteria handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ScoreError> {
        if criteria.is_empty() {
            return Err(ScoreError::EmptyRubric);
        }

        for (position, criterion) in criteria.iter().enumerate() {
            if !criterion.default_weight.is_finite() || criterion.default_weight <= 0.0 {
                return Err(ScoreError::InvalidWeight {
                    criterion: criterion.name.clone(),
                    weight: criterion.default_weight,
                });
            }
            if criteria[..position]
                .iter()
                .any(|earlier| earlier.name == criterion.name)
            {
                return Err(ScoreError::DuplicateCriterion {
                    criterion: criterion.name.clone(),
                });
            }
        }

        Ok(Self { criteria })
    }

    /// The eleven-criterion citizenship rubric, all weights 1.0.
    pub fn standard() -> Self {
        let criteria = [
            (
                "Promoção da equidade e inclusão",
                "Adaptação de recursos para alunos com necessidades específicas",
            ),
            (
                "Estímulo à participação democrática",
                "Debate ou assembleia escolar simulada",
            ),
            (
                "Desenvolvimento do pensamento crítico",
                "Análise de dilemas éticos contemporâneos",
            ),
            (
                "Integração com problemas reais da sociedade",
                "Estudo de caso sobre questões locais",
            ),
            (
                "Uso ético e consciente das tecnologias",
                "Discussão sobre privacidade e comportamento online",
            ),
            (
                "Valorização de identidades e culturas diversas",
                "Feira cultural ou roda de saberes",
            ),
            (
                "Empatia e diálogo",
                "Oficina de escuta ativa e expressão emocional",
            ),
            (
                "Consciência socioambiental",
                "Projeto de reaproveitamento de materiais",
            ),
            (
                "Direitos humanos e justiça social",
                "Análise de filmes ou reportagens sobre injustiças sociais",
            ),
            (
                "Engajamento comunitário e responsabilidade coletiva",
                "Ações solidárias na comunidade local",
            ),
            (
                "Cidadania digital",
                "Campanha educativa sobre cyberbullying e fake news",
            ),
        ]
        .into_iter()
        .map(|(name, activity)| Criterion::new(name, 1.0, activity))
        .collect();

        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.name == name)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Admissible range for caller-supplied weights and an optional required total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_total: Option<f64>,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 5.0,
            required_total: None,
        }
    }
}

impl WeightPolicy {
    /// Weights in `0.1..=2.0` that must add up to exactly 10.
    pub fn fixed_total(total: f64) -> Self {
        Self {
            min: 0.1,
            max: 2.0,
            required_total: Some(total),
        }
    }

    pub fn check(&self, criterion: &str, weight: f64) -> Result<(), ScoreError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ScoreError::InvalidWeight {
                criterion: criterion.to_string(),
                weight,
            });
        }
        if weight < self.min || weight > self.max {
            return Err(ScoreError::WeightOutOfBounds {
                criterion: criterion.to_string(),
                weight,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn check_total(&self, total: f64) -> Result<(), ScoreError> {
        match self.required_total {
            Some(expected) if (expected - total).abs() > TOTAL_TOLERANCE => {
                Err(ScoreError::WeightTotalMismatch {
                    expected,
                    actual: total,
                })
            }
            _ => Ok(()),
        }
    }
}
