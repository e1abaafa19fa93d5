use serde::{Deserialize, Serialize};

use super::ScoreError;

/// Qualitative reading of a contribution index. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationBand {
    Low,
    Regular,
    Good,
    Excellent,
}

impl InterpretationBand {
    /// Bands from the highest threshold down.
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Regular, Self::Low]
    }

    pub const fn lower_bound(self) -> f64 {
        match self {
            Self::Excellent => 0.85,
            Self::Good => 0.70,
            Self::Regular => 0.50,
            Self::Low => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excelente contribuição para a formação cidadã e a diversidade social."
            }
            Self::Good => "Boa contribuição, com potencial de fortalecimento em alguns critérios.",
            Self::Regular => {
                "Contribuição regular, recomenda-se revisão e reforço em múltiplas dimensões."
            }
            Self::Low => {
                "Baixa contribuição; é necessário reestruturar a proposta para ampliar o impacto cidadão."
            }
        }
    }
}

/// Looks up the band for an index in `[0, 1]`.
pub fn interpret(index: f64) -> Result<InterpretationBand, ScoreError> {
    if !(0.0..=1.0).contains(&index) {
        return Err(ScoreError::OutOfRange { index });
    }

    let band = InterpretationBand::ordered()
        .into_iter()
        .find(|band| index >= band.lower_bound())
        .unwrap_or(InterpretationBand::Low);

    Ok(band)
}
