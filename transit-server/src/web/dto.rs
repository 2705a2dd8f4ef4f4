//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, TripRequest};
use crate::routing::RouteData;

/// Query string for `GET /api/recommendations`.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,

    /// Departure time as "HH:MM"
    #[serde(default)]
    pub preferred_time: String,

    /// Comma-separated mode keywords
    #[serde(default)]
    pub mode_preferences: String,

    /// Set to "0", "false" or "off" to skip the trained model
    pub use_ml: Option<String>,
}

impl RecommendationQuery {
    pub fn trip(&self) -> TripRequest {
        TripRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            preferred_time: self.preferred_time.clone(),
            mode_preferences: self.mode_preferences.clone(),
        }
    }
}

/// Query string accepted alongside a JSON trip body.
#[derive(Debug, Default, Deserialize)]
pub struct ModelToggle {
    pub use_ml: Option<String>,
}

/// Query string for `GET /api/route`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,

    /// Mode name, defaults to Bus
    pub mode: Option<String>,
}

/// Route details for drawing a trip on a map.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub distance_meters: f64,
    pub eta_minutes: u32,
    pub cost: f64,
    pub origin: String,
    pub destination: String,
    pub mode: Mode,

    /// Path as `[latitude, longitude]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Create from provider route data.
    pub fn from_route(origin: &str, destination: &str, mode: Mode, route: &RouteData) -> Self {
        Self {
            distance_meters: route.distance_meters,
            eta_minutes: route.eta_minutes,
            cost: route.cost,
            origin: origin.to_string(),
            destination: destination.to_string(),
            mode,
            coordinates: route.lat_lon_path(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Interpret the `use_ml` flag. Absent means enabled.
pub fn parse_use_ml(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off"),
    }
}
