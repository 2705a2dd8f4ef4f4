//! Fare estimation from route distance.
//!
//! Rates are in PKR per kilometre.

use crate::domain::Mode;

/// Per-kilometre rate for a mode.
pub fn rate_per_km(mode: Mode) -> f64 {
    match mode {
        Mode::Bus => 4.0,
        Mode::Metro => 3.5,
        // Quarter of the taxi rate.
        Mode::RideShare => 25.0 / 4.0,
        Mode::Taxi => 25.0,
    }
}

/// Estimate the fare for travelling `distance_meters` by `mode`.
///
/// The result is rounded to 2 decimal places. Negative or non-finite
/// distances are treated as zero.
///
/// ```
/// use transit_server::domain::Mode;
/// use transit_server::recommend::estimate_cost;
///
/// assert_eq!(estimate_cost(Mode::Bus, 100_000.0), 400.0);
/// assert_eq!(estimate_cost(Mode::RideShare, 100_000.0), 625.0);
/// ```
pub fn estimate_cost(mode: Mode, distance_meters: f64) -> f64 {
    let meters = if distance_meters.is_finite() {
        distance_meters.max(0.0)
    } else {
        0.0
    };
    round_cents(rate_per_km(mode) * meters / 1000.0)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
