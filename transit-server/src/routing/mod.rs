//! Route data providers.
//!
//! A provider turns (origin, destination, mode) into travel time, distance
//! and a fare estimate. Providers fail often and for ordinary reasons
//! (unknown place names, network trouble, missing API key); callers are
//! expected to degrade rather than propagate.

mod client;
mod convert;
mod error;
mod fixtures;
mod types;

use std::future::Future;

use crate::domain::Mode;

pub use client::{OrsClient, OrsConfig};
pub use convert::{RouteData, convert_directions};
pub use error::RouteError;
pub use fixtures::{FixtureRouteProvider, RouteFixture};
pub use types::{DirectionsResponse, GeocodeResponse};

/// Source of route data for one mode of a trip.
///
/// This abstraction allows the recommender to be tested with mock data.
pub trait RouteProvider {
    /// Route `origin` to `destination` by `mode`.
    fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: Mode,
    ) -> impl Future<Output = Result<RouteData, RouteError>> + Send;
}

/// The provider chosen at startup.
#[derive(Debug, Clone)]
pub enum RouteSource {
    Ors(OrsClient),
    Fixtures(FixtureRouteProvider),
}

impl RouteProvider for RouteSource {
    async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: Mode,
    ) -> Result<RouteData, RouteError> {
        match self {
            RouteSource::Ors(client) => client.fetch(origin, destination, mode).await,
            RouteSource::Fixtures(fixtures) => fixtures.fetch(origin, destination, mode).await,
        }
    }
}

impl From<OrsClient> for RouteSource {
    fn from(client: OrsClient) -> Self {
        RouteSource::Ors(client)
    }
}

impl From<FixtureRouteProvider> for RouteSource {
    fn from(fixtures: FixtureRouteProvider) -> Self {
        RouteSource::Fixtures(fixtures)
    }
}
