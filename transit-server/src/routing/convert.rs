//! Conversion of raw route summaries into [`RouteData`].

use serde::Serialize;

use crate::domain::{Candidate, Mode};
use crate::recommend::estimate_cost;

use super::error::RouteError;
use super::types::DirectionsResponse;

/// Route metrics for one mode between two places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteData {
    /// Whole minutes, truncated.
    pub eta_minutes: u32,

    /// Estimated fare from the route distance.
    pub cost: f64,

    pub distance_meters: f64,

    /// Path as (longitude, latitude) pairs.
    pub geometry: Vec<(f64, f64)>,
}

impl RouteData {
    /// Build route data from a provider's duration and distance.
    ///
    /// ```
    /// use transit_server::domain::Mode;
    /// use transit_server::routing::RouteData;
    ///
    /// let route = RouteData::from_summary(Mode::Bus, 2999.0, 50_000.0, vec![]).unwrap();
    /// assert_eq!(route.eta_minutes, 49);
    /// assert_eq!(route.cost, 200.0);
    /// ```
    pub fn from_summary(
        mode: Mode,
        duration_seconds: f64,
        distance_meters: f64,
        geometry: Vec<(f64, f64)>,
    ) -> Result<Self, RouteError> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(RouteError::InvalidRoute(format!(
                "duration {duration_seconds}s"
            )));
        }
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(RouteError::InvalidRoute(format!(
                "distance {distance_meters}m"
            )));
        }

        // Saturates for durations beyond u32::MAX minutes.
        let eta_minutes = (duration_seconds / 60.0).trunc() as u32;

        Ok(Self {
            eta_minutes,
            cost: estimate_cost(mode, distance_meters),
            distance_meters,
            geometry,
        })
    }

    /// Geometry flipped to (latitude, longitude), as map widgets expect.
    pub fn lat_lon_path(&self) -> Vec<[f64; 2]> {
        self.geometry.iter().map(|(lon, lat)| [*lat, *lon]).collect()
    }

    pub fn into_candidate(self, mode: Mode) -> Candidate {
        Candidate::new(mode, self.eta_minutes, self.cost).with_distance(self.distance_meters)
    }
}

/// Take the first route of a directions response.
pub fn convert_directions(
    response: &DirectionsResponse,
    mode: Mode,
) -> Result<RouteData, RouteError> {
    let feature = response.features.first().ok_or(RouteError::NoRoute)?;
    let summary = &feature.properties.summary;
    RouteData::from_summary(
        mode,
        summary.duration,
        summary.distance,
        feature.geometry.path(),
    )
}
