//! OpenRouteService HTTP client.
//!
//! Routing a trip takes three requests: geocode the origin, geocode the
//! destination, then ask for directions between the two points.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Mode;

use super::RouteProvider;
use super::convert::{RouteData, convert_directions};
use super::error::RouteError;
use super::types::{DirectionsResponse, GeocodeResponse};

/// Default base URL for OpenRouteService.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the OpenRouteService client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to the public ORS endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for self-hosted ORS or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OpenRouteService client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    configured: bool,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    ///
    /// An empty API key is accepted; every fetch then fails with
    /// [`RouteError::NotConfigured`].
    pub fn new(config: OrsConfig) -> Result<Self, RouteError> {
        let mut headers = HeaderMap::new();

        if !config.api_key.is_empty() {
            let api_key = HeaderValue::from_str(&config.api_key)
                .map_err(|_| RouteError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            configured: !config.api_key.is_empty(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Geocode a place name to (longitude, latitude).
    pub async fn geocode(&self, text: &str) -> Result<(f64, f64), RouteError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/geocode/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("text", text), ("size", "1")])
            .send()
            .await?;

        let body = read_body(response).await?;
        let geocode: GeocodeResponse = parse_json(&body)?;

        geocode
            .best_match()
            .ok_or_else(|| RouteError::NoGeocode(text.to_string()))
    }

    /// Get directions between two (longitude, latitude) points.
    pub async fn directions(
        &self,
        start: (f64, f64),
        end: (f64, f64),
        profile: &str,
    ) -> Result<DirectionsResponse, RouteError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/v2/directions/{}/geojson", self.base_url, profile);
        let body = serde_json::json!({
            "coordinates": [[start.0, start.1], [end.0, end.1]]
        });

        let response = self.http.post(&url).json(&body).send().await?;

        let body = read_body(response).await?;
        parse_json(&body)
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, RouteError> {
        self.semaphore.acquire().await.map_err(|_| RouteError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })
    }
}

impl RouteProvider for OrsClient {
    async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: Mode,
    ) -> Result<RouteData, RouteError> {
        if !self.configured {
            return Err(RouteError::NotConfigured("ORS_API_KEY is empty".to_string()));
        }

        let start = self.geocode(origin).await?;
        let end = self.geocode(destination).await?;
        debug!(?start, ?end, %mode, "geocoded trip");

        let response = self.directions(start, end, mode.routing_profile()).await?;
        convert_directions(&response, mode)
    }
}

/// Map error statuses to errors and return the body of a success.
async fn read_body(response: reqwest::Response) -> Result<String, RouteError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(RouteError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RouteError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RouteError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, RouteError> {
    serde_json::from_str(body).map_err(|e| RouteError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
