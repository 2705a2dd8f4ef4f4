//! The recommendation pipeline.
//!
//! Each call runs three stages independently of every other call:
//! candidate discovery, scoring, ranking. Nothing in the pipeline is fatal.
//! Routing failures fall back to fixed candidates, and model failures fall
//! back to rule-based scoring.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{
    Candidate, Mode, ModePreferences, Recommendation, Recommendations, TripRequest,
};
use crate::model::{LoadedModel, ModelError, ModelStore};
use crate::routing::{RouteData, RouteError, RouteProvider};

use super::config::ScoringConfig;
use super::features::FeatureVector;
use super::rank::{rank_by_score, rule_score};

/// Candidates found for a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub candidates: Vec<Candidate>,

    /// The fixed fallback candidates replaced live data.
    pub used_fallback: bool,
}

/// Scores trip candidates by routing each mode and applying a model or
/// heuristic.
pub struct Recommender<P: RouteProvider> {
    provider: P,
    models: ModelStore,
    config: ScoringConfig,
}

impl<P: RouteProvider> Recommender<P> {
    /// Create a new recommender.
    pub fn new(provider: P, models: ModelStore, config: ScoringConfig) -> Self {
        Self {
            provider,
            models,
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn models(&self) -> &ModelStore {
        &self.models
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Rank the modes available for `trip`.
    ///
    /// With `use_model` set, a trained model scores the candidates when one
    /// loads; otherwise the rule-based heuristic does. The result is never
    /// empty.
    pub async fn generate_recommendations(
        &self,
        trip: &TripRequest,
        use_model: bool,
    ) -> Recommendations {
        let preferences = trip.preferences();
        let discovery = self.discover_candidates(trip, &preferences).await;

        if use_model {
            match self.models.load().await {
                Ok(model) => {
                    let recommendations = score_with_model(
                        &model,
                        trip,
                        &preferences,
                        &discovery.candidates,
                        &self.config,
                    );
                    return Recommendations {
                        recommendations,
                        used_model: true,
                        used_fallback: discovery.used_fallback,
                    };
                }
                Err(ModelError::NotFound(path)) => {
                    debug!(path = %path.display(), "no scoring model, using rules");
                }
                Err(e) => {
                    warn!(error = %e, "scoring model unavailable, using rules");
                }
            }
        }

        Recommendations {
            recommendations: score_with_rules(&discovery.candidates, &self.config),
            used_model: false,
            used_fallback: discovery.used_fallback,
        }
    }

    /// Probe the provider for every candidate mode of the trip.
    ///
    /// Modes are probed concurrently; candidates come back in canonical mode
    /// order. When no mode yields route data the fixed fallback candidates
    /// are used instead.
    pub async fn discover_candidates(
        &self,
        trip: &TripRequest,
        preferences: &ModePreferences,
    ) -> Discovery {
        let modes = preferences.candidate_modes();

        let probes = modes.iter().map(|&mode| async move {
            let result = self
                .provider
                .fetch(&trip.origin, &trip.destination, mode)
                .await;
            (mode, result)
        });

        let candidates: Vec<Candidate> = join_all(probes)
            .await
            .into_iter()
            .filter_map(|(mode, result)| match result {
                Ok(route) => Some(route.into_candidate(mode)),
                Err(e) => {
                    warn!(%mode, error = %e, "no route data");
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            info!(
                probed = modes.len(),
                "no live route data, using fallback candidates"
            );
            return Discovery {
                candidates: Candidate::fallback(),
                used_fallback: true,
            };
        }

        Discovery {
            candidates,
            used_fallback: false,
        }
    }

    /// Route data for a single mode, for map display.
    pub async fn route_for(
        &self,
        origin: &str,
        destination: &str,
        mode: Mode,
    ) -> Result<RouteData, RouteError> {
        self.provider.fetch(origin, destination, mode).await
    }
}

/// Score candidates with a trained model and sort best-first.
///
/// If inference fails for any candidate, every candidate gets
/// `config.inference_fallback_score`.
pub fn score_with_model(
    model: &LoadedModel,
    trip: &TripRequest,
    preferences: &ModePreferences,
    candidates: &[Candidate],
    config: &ScoringConfig,
) -> Vec<Recommendation> {
    let scaling = model.scaling();
    let features: Vec<FeatureVector> = candidates
        .iter()
        .map(|c| scaling.build(trip, c.mode, preferences, c.eta_minutes, c.cost))
        .collect();

    let scores = model.model.predict_batch(&features).unwrap_or_else(|e| {
        warn!(error = %e, "model inference failed, using uniform scores");
        vec![config.inference_fallback_score; candidates.len()]
    });

    let recommendations = candidates
        .iter()
        .zip(scores)
        .map(|(c, score)| {
            let score = if config.clamp_model_scores {
                score.clamp(0.0, 1.0)
            } else {
                score
            };
            c.score(score)
        })
        .collect();

    rank_by_score(recommendations)
}

/// Score candidates with the rule-based heuristic.
pub fn score_with_rules(candidates: &[Candidate], config: &ScoringConfig) -> Vec<Recommendation> {
    let recommendations: Vec<Recommendation> =
        candidates.iter().map(|c| c.score(rule_score(c))).collect();

    if config.sort_rule_based {
        rank_by_score(recommendations)
    } else {
        recommendations
    }
}
