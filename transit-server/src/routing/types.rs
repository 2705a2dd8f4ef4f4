//! OpenRouteService response types.
//!
//! Only the fields the recommender reads are modelled. ORS omits
//! `distance` and `duration` from a summary when they are zero, so both
//! default.

use serde::Deserialize;

/// Pelias geocoding response (`/geocode/search`).
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

impl GeocodeResponse {
    /// Coordinates of the best match, as (longitude, latitude).
    pub fn best_match(&self) -> Option<(f64, f64)> {
        let coords = &self.features.first()?.geometry.coordinates;
        match coords.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

/// Directions response in GeoJSON format
/// (`/v2/directions/{profile}/geojson`).
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    pub properties: RouteProperties,
    pub geometry: LineGeometry,
}

#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    #[serde(default)]
    pub summary: RouteSummary,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteSummary {
    /// Metres.
    #[serde(default)]
    pub distance: f64,

    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// `[longitude, latitude]` or `[longitude, latitude, elevation]`.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

impl LineGeometry {
    /// Path as (longitude, latitude) pairs, dropping malformed points.
    pub fn path(&self) -> Vec<(f64, f64)> {
        self.coordinates
            .iter()
            .filter_map(|c| match c.as_slice() {
                [lon, lat, ..] => Some((*lon, *lat)),
                _ => None,
            })
            .collect()
    }
}
