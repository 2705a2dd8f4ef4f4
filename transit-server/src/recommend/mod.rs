//! Transport mode recommendation.
//!
//! Given a trip, this module answers: "which way of getting there should I
//! take?" Each candidate mode is routed, priced and scored, either by a
//! trained regression model or by a fixed heuristic, and the results are
//! ranked best-first.

mod config;
mod cost;
mod engine;
mod features;
mod rank;

#[cfg(test)]
mod engine_tests;

pub use config::ScoringConfig;
pub use cost::{estimate_cost, rate_per_km};
pub use engine::{Discovery, Recommender, score_with_model, score_with_rules};
pub use features::{
    DEFAULT_COST_NORMALIZER, DEFAULT_HOUR, FEATURE_COUNT, FEATURE_NAMES, FeatureScaling,
    FeatureVector, HourParseError, build_features, parse_hour,
};
pub use rank::{
    BASE_SCORE, CHEAP_BONUS, CHEAP_COST, FAST_BONUS, FAST_ETA_MINUTES, METRO_BASE_SCORE,
    rank_by_score, rule_score,
};
