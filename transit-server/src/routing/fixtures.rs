//! Fixture route provider for running without routing API access.
//!
//! Loads route summaries from a JSON file and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Mode;

use super::RouteProvider;
use super::convert::RouteData;
use super::error::RouteError;

/// One canned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFixture {
    pub origin: String,
    pub destination: String,
    pub mode: Mode,
    pub duration_seconds: f64,
    pub distance_meters: f64,

    /// Path as `[longitude, latitude]` pairs.
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,
}

type FixtureKey = (String, String, Mode);

fn key(origin: &str, destination: &str, mode: Mode) -> FixtureKey {
    (
        origin.trim().to_lowercase(),
        destination.trim().to_lowercase(),
        mode,
    )
}

/// Route provider that serves data from fixtures.
///
/// Place names match case-insensitively. Trips without a fixture fail with
/// [`RouteError::NoRoute`], as a real provider would for an unroutable trip.
#[derive(Debug, Clone, Default)]
pub struct FixtureRouteProvider {
    routes: HashMap<FixtureKey, RouteFixture>,
}

impl FixtureRouteProvider {
    /// Build a provider from in-memory fixtures. Later duplicates win.
    pub fn from_fixtures(fixtures: impl IntoIterator<Item = RouteFixture>) -> Self {
        let routes = fixtures
            .into_iter()
            .map(|f| (key(&f.origin, &f.destination, f.mode), f))
            .collect();
        Self { routes }
    }

    /// Load fixtures from a JSON file containing an array of
    /// [`RouteFixture`] objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| RouteError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let fixtures: Vec<RouteFixture> =
            serde_json::from_str(&json).map_err(|e| RouteError::Fixture {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self::from_fixtures(fixtures))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteProvider for FixtureRouteProvider {
    async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: Mode,
    ) -> Result<RouteData, RouteError> {
        let fixture = self
            .routes
            .get(&key(origin, destination, mode))
            .ok_or(RouteError::NoRoute)?;

        RouteData::from_summary(
            mode,
            fixture.duration_seconds,
            fixture.distance_meters,
            fixture.geometry.iter().map(|[lon, lat]| (*lon, *lat)).collect(),
        )
    }
}
