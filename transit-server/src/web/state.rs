//! Application state for the web layer.

use std::sync::Arc;

use crate::recommend::Recommender;
use crate::routing::RouteSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation pipeline over the configured route provider
    pub recommender: Arc<Recommender<RouteSource>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(recommender: Recommender<RouteSource>) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}
