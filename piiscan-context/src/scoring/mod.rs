// piiscan-context/src/scoring/mod.rs

use crate::Confidence;

/// Weights applied to the individual context signals when accumulating the
/// raw signal score for a finding.
#[derive(Debug, Clone)]
pub struct SignalWeights {
    pub placeholder_context: i32,
    pub contact_context: i32,
    pub placeholder_value: i32,
    pub placeholder_domain: i32,
    pub id_context: i32,
    pub entity_presence: i32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            placeholder_context: -2,
            contact_context: 1,
            placeholder_value: -2,
            placeholder_domain: -3,
            id_context: 1,
            entity_presence: 1,
        }
    }
}

/// Maps an accumulated signal score to a confidence that the value is
/// genuine. Strong positive evidence saturates at 0.85, strong negative at
/// 0.15; the uncertain middle band stays within [0.25, 0.75].
pub fn genuineness_confidence(score: i32) -> Confidence {
    if score >= 2 {
        0.85
    } else if score <= -2 {
        0.15
    } else {
        (0.50 + 0.10 * score as f64).clamp(0.25, 0.75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_signals_saturate() {
        assert_eq!(genuineness_confidence(2), 0.85);
        assert_eq!(genuineness_confidence(5), 0.85);
        assert_eq!(genuineness_confidence(-2), 0.15);
        assert_eq!(genuineness_confidence(-7), 0.15);
    }

    #[test]
    fn uncertain_band_is_bounded() {
        assert_eq!(genuineness_confidence(0), 0.50);
        assert_eq!(genuineness_confidence(1), 0.60);
        assert_eq!(genuineness_confidence(-1), 0.40);
    }
}
