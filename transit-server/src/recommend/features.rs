//! Feature encoding for the scoring model.
//!
//! A feature vector is a fixed-order numeric encoding of one
//! (trip, mode, preferences, eta, cost) tuple. The order must match the
//! order the model was trained with; see [`FEATURE_NAMES`].

use std::num::ParseIntError;

use tracing::debug;

use crate::domain::{Mode, ModePreferences, TripRequest};

/// Number of features in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 11;

/// Feature names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "origin_len",
    "dest_len",
    "airport",
    "hour",
    "mode_idx",
    "pref_bus",
    "pref_metro",
    "pref_rideshare",
    "pref_taxi",
    "eta_normalized",
    "cost_normalized",
];

/// Hour used when the preferred time is missing or unparsable.
pub const DEFAULT_HOUR: i64 = 12;

/// Cost divisor used when the model does not declare one.
pub const DEFAULT_COST_NORMALIZER: f64 = 5000.0;

/// Minutes per unit of normalized ETA.
const ETA_NORMALIZER: f64 = 60.0;

/// Upper bound for both normalized ETA and normalized cost.
const NORMALIZED_CAP: f64 = 2.0;

/// Error parsing the hour out of a preferred time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HourParseError {
    #[error("no preferred time given")]
    Empty,

    #[error("invalid hour in {input:?}: {source}")]
    Invalid {
        input: String,
        source: ParseIntError,
    },
}

/// Parse the hour from an "HH:MM" string.
///
/// Only the part before the first ':' is read. Surrounding whitespace and a
/// leading sign are accepted; the value is not range-checked.
pub fn parse_hour(preferred_time: &str) -> Result<i64, HourParseError> {
    if preferred_time.trim().is_empty() {
        return Err(HourParseError::Empty);
    }
    let head = preferred_time.split(':').next().unwrap_or_default();
    head.trim()
        .parse::<i64>()
        .map_err(|source| HourParseError::Invalid {
            input: preferred_time.to_string(),
            source,
        })
}

/// A fixed-order feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Look up a feature by name.
    pub fn named(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.get(i))
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Normalization constants applied to ETA and cost.
///
/// A loaded model supplies the cost divisor it was trained with, so the
/// serving path scales features the same way training did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScaling {
    pub cost_normalizer: f64,
}

impl Default for FeatureScaling {
    fn default() -> Self {
        Self {
            cost_normalizer: DEFAULT_COST_NORMALIZER,
        }
    }
}

impl FeatureScaling {
    pub fn new(cost_normalizer: f64) -> Self {
        Self { cost_normalizer }
    }

    /// Build the feature vector for one candidate.
    pub fn build(
        &self,
        trip: &TripRequest,
        mode: Mode,
        preferences: &ModePreferences,
        eta_minutes: u32,
        cost: f64,
    ) -> FeatureVector {
        let airport = contains_airport(&trip.origin) || contains_airport(&trip.destination);

        let hour = parse_hour(&trip.preferred_time).unwrap_or_else(|e| {
            debug!(error = %e, "defaulting preferred hour to {DEFAULT_HOUR}");
            DEFAULT_HOUR
        });

        FeatureVector([
            trip.origin.chars().count() as f64,
            trip.destination.chars().count() as f64,
            flag(airport),
            hour as f64,
            f64::from(mode.index()),
            flag(preferences.prefers(Mode::Bus)),
            flag(preferences.prefers(Mode::Metro)),
            flag(preferences.prefers(Mode::RideShare)),
            flag(preferences.prefers(Mode::Taxi)),
            (f64::from(eta_minutes) / ETA_NORMALIZER).min(NORMALIZED_CAP),
            (cost / self.cost_normalizer).min(NORMALIZED_CAP),
        ])
    }
}

/// Build a feature vector with the default serving scale.
pub fn build_features(
    trip: &TripRequest,
    mode: Mode,
    preferences: &ModePreferences,
    eta_minutes: u32,
    cost: f64,
) -> FeatureVector {
    FeatureScaling::default().build(trip, mode, preferences, eta_minutes, cost)
}

fn contains_airport(place: &str) -> bool {
    place.to_lowercase().contains("airport")
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
