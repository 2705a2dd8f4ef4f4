//! Candidates and scored recommendations.

use serde::{Deserialize, Serialize};

use super::Mode;

/// A mode with its estimated travel time and cost for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub mode: Mode,
    pub eta_minutes: u32,
    pub cost: f64,

    /// Route length, when the estimate came from a routing provider.
    pub distance_meters: Option<f64>,
}

impl Candidate {
    pub fn new(mode: Mode, eta_minutes: u32, cost: f64) -> Self {
        Self {
            mode,
            eta_minutes,
            cost,
            distance_meters: None,
        }
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    /// Hardcoded estimates used when no mode could be routed.
    pub fn fallback() -> Vec<Candidate> {
        vec![
            Candidate::new(Mode::Bus, 40, 350.0),
            Candidate::new(Mode::Metro, 25, 180.0),
            Candidate::new(Mode::RideShare, 20, 700.0),
        ]
    }

    /// Attach a score.
    pub fn score(&self, score: f64) -> Recommendation {
        Recommendation {
            mode: self.mode,
            eta_minutes: self.eta_minutes,
            cost: self.cost,
            score,
        }
    }
}

/// A scored mode, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub mode: Mode,
    pub eta_minutes: u32,
    pub cost: f64,
    pub score: f64,
}

/// Output of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,

    /// Whether a trained model produced the scores.
    pub used_model: bool,

    /// Whether the hardcoded fallback candidates replaced live route data.
    pub used_fallback: bool,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// The highest-ranked recommendation.
    pub fn best(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.recommendations.iter().map(|r| r.mode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_candidates() {
        let fallback = Candidate::fallback();
        assert_eq!(fallback.len(), 3);
        assert_eq!(fallback[0], Candidate::new(Mode::Bus, 40, 350.0));
        assert_eq!(fallback[1], Candidate::new(Mode::Metro, 25, 180.0));
        assert_eq!(fallback[2], Candidate::new(Mode::RideShare, 20, 700.0));
        assert!(fallback.iter().all(|c| c.distance_meters.is_none()));
    }

    #[test]
    fn recommendation_json_shape() {
        let rec = Candidate::new(Mode::Bus, 180, 800.0).score(0.85);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "Bus",
                "eta_minutes": 180,
                "cost": 800.0,
                "score": 0.85,
            })
        );
    }
}
