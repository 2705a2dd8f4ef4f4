//! Routing provider error types.

use std::path::PathBuf;

/// Errors from a route data provider.
///
/// The recommender treats every variant the same way: no data for that
/// mode. The variants exist so logs say why.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check ORS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Geocoder had no match for a place name
    #[error("no geocoding match for {0:?}")]
    NoGeocode(String),

    /// No route between the two places for this mode
    #[error("no route found")]
    NoRoute,

    /// Route summary had impossible values
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Fixture file could not be loaded
    #[error("fixture error in {path}: {message}")]
    Fixture { path: PathBuf, message: String },

    /// Provider not configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}
