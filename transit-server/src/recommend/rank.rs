//! Ordering and scoring rules for recommendations.

use crate::domain::{Candidate, Mode, Recommendation};

/// Base score for every mode except metro.
pub const BASE_SCORE: f64 = 0.6;

/// Base score for metro.
pub const METRO_BASE_SCORE: f64 = 0.8;

/// Trips faster than this many minutes get [`FAST_BONUS`].
pub const FAST_ETA_MINUTES: u32 = 20;
pub const FAST_BONUS: f64 = 0.1;

/// Trips cheaper than this (PKR) get [`CHEAP_BONUS`].
pub const CHEAP_COST: f64 = 1000.0;
pub const CHEAP_BONUS: f64 = 0.05;

/// Heuristic score for a candidate, capped at 1.0.
///
/// ```
/// use transit_server::domain::{Candidate, Mode};
/// use transit_server::recommend::rule_score;
///
/// let score = rule_score(&Candidate::new(Mode::Metro, 15, 500.0));
/// assert!((score - 0.95).abs() < 1e-9);
/// ```
pub fn rule_score(candidate: &Candidate) -> f64 {
    let mut score = if candidate.mode == Mode::Metro {
        METRO_BASE_SCORE
    } else {
        BASE_SCORE
    };

    if candidate.eta_minutes < FAST_ETA_MINUTES {
        score += FAST_BONUS;
    }
    if candidate.cost < CHEAP_COST {
        score += CHEAP_BONUS;
    }

    score.min(1.0)
}

/// Sort recommendations best-first.
///
/// The sort is stable: equal scores keep their incoming order.
pub fn rank_by_score(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations
}
