//! Scoring configuration for the recommender.

/// Configuration parameters for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Sort rule-based recommendations by score.
    /// When off they keep candidate discovery order.
    pub sort_rule_based: bool,

    /// Clamp model predictions to [0, 1].
    /// Regression output is otherwise returned as-is.
    pub clamp_model_scores: bool,

    /// Score given to every candidate when model inference fails.
    pub inference_fallback_score: f64,
}

impl ScoringConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(sort_rule_based: bool, clamp_model_scores: bool) -> Self {
        Self {
            sort_rule_based,
            clamp_model_scores,
            ..Self::default()
        }
    }

    /// Set the score used when inference fails.
    pub fn with_inference_fallback_score(mut self, score: f64) -> Self {
        self.inference_fallback_score = score;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sort_rule_based: true,
            clamp_model_scores: false,
            inference_fallback_score: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScoringConfig::default();

        assert!(config.sort_rule_based);
        assert!(!config.clamp_model_scores);
        assert_eq!(config.inference_fallback_score, 0.5);
    }

    #[test]
    fn custom_config() {
        let config = ScoringConfig::new(false, true).with_inference_fallback_score(0.0);

        assert!(!config.sort_rule_based);
        assert!(config.clamp_model_scores);
        assert_eq!(config.inference_fallback_score, 0.0);
    }
}
