//! Unit tests for the recommendation pipeline.

use super::config::ScoringConfig;
use super::engine::*;
use crate::domain::{Mode, TripRequest};
use crate::model::{ModelStore, ModelStoreConfig};
use crate::routing::{RouteData, RouteError, RouteProvider};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::{TempDir, tempdir};

/// Mock route provider for testing.
struct MockProvider {
    routes: HashMap<Mode, (f64, f64)>, // (duration seconds, distance meters)
    calls: Mutex<Vec<Mode>>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            routes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every mode routes 10 km; durations differ.
    fn city() -> Self {
        Self::new()
            .with_route(Mode::Bus, 2400.0, 10_000.0)
            .with_route(Mode::Metro, 1500.0, 10_000.0)
            .with_route(Mode::RideShare, 1200.0, 10_000.0)
            .with_route(Mode::Taxi, 900.0, 10_000.0)
    }

    fn with_route(mut self, mode: Mode, duration_s: f64, distance_m: f64) -> Self {
        self.routes.insert(mode, (duration_s, distance_m));
        self
    }

    fn calls(&self) -> Vec<Mode> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

impl RouteProvider for MockProvider {
    async fn fetch(
        &self,
        _origin: &str,
        _destination: &str,
        mode: Mode,
    ) -> Result<RouteData, RouteError> {
        self.calls.lock().unwrap().push(mode);
        let (duration, distance) = self.routes.get(&mode).ok_or(RouteError::NoRoute)?;
        RouteData::from_summary(mode, *duration, *distance, vec![])
    }
}

/// A store pointing at an empty temp directory.
fn no_model() -> (TempDir, ModelStore) {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(ModelStoreConfig::new(dir.path().join("recommender.json")));
    (dir, store)
}

fn model_store(model: &str, metadata: Option<&str>) -> (TempDir, ModelStore) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recommender.json");
    std::fs::write(&path, model).unwrap();
    if let Some(metadata) = metadata {
        std::fs::write(dir.path().join("recommender-meta.json"), metadata).unwrap();
    }
    let store = ModelStore::new(ModelStoreConfig::new(&path));
    (dir, store)
}

/// Linear model over a single feature.
fn linear(intercept: f64, feature: usize, weight: f64) -> String {
    let mut coefficients = [0.0; 11];
    coefficients[feature] = weight;
    serde_json::json!({
        "kind": "linear",
        "intercept": intercept,
        "coefficients": coefficients,
    })
    .to_string()
}

fn recommender(
    provider: MockProvider,
    store: ModelStore,
    config: ScoringConfig,
) -> Recommender<MockProvider> {
    Recommender::new(provider, store, config)
}

fn trip() -> TripRequest {
    TripRequest::new("Saddar", "Blue Area").with_preferred_time("08:30")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn no_preferences_probes_every_mode() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert_eq!(engine.provider().calls(), Mode::ALL.to_vec());
    assert!(!result.used_model);
    assert!(!result.used_fallback);
    assert_eq!(
        result.modes(),
        vec![Mode::Metro, Mode::Taxi, Mode::Bus, Mode::RideShare]
    );

    let metro = &result.recommendations[0];
    assert_eq!(metro.eta_minutes, 25);
    assert_eq!(metro.cost, 35.0);
    assert_close(metro.score, 0.85);
    assert_close(result.recommendations[1].score, 0.75);
}

#[tokio::test]
async fn preferences_limit_probes() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine
        .generate_recommendations(&trip().with_mode_preferences("bus"), false)
        .await;

    assert_eq!(engine.provider().calls(), vec![Mode::Bus]);
    assert_eq!(result.modes(), vec![Mode::Bus]);
}

#[tokio::test]
async fn provider_down_uses_fallback() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::new(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert!(result.used_fallback);
    assert!(!result.used_model);
    assert_eq!(
        result.modes(),
        vec![Mode::Metro, Mode::Bus, Mode::RideShare]
    );
    assert_close(result.recommendations[0].score, 0.85);
    assert_close(result.recommendations[1].score, 0.65);
    assert_close(result.recommendations[2].score, 0.65);
    assert_eq!(result.recommendations[0].eta_minutes, 25);
    assert_eq!(result.recommendations[0].cost, 180.0);
}

#[tokio::test]
async fn unsorted_rules_keep_discovery_order() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::new(), store, ScoringConfig::new(false, false));

    let result = engine.generate_recommendations(&trip(), false).await;

    assert_eq!(
        result.modes(),
        vec![Mode::Bus, Mode::Metro, Mode::RideShare]
    );
}

#[tokio::test]
async fn unknown_preferences_probe_nothing() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine
        .generate_recommendations(&trip().with_mode_preferences("walking"), false)
        .await;

    assert!(engine.provider().calls().is_empty());
    assert!(result.used_fallback);
    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn partial_failure_keeps_successes() {
    let (_dir, store) = no_model();
    let provider = MockProvider::new().with_route(Mode::Metro, 1800.0, 20_000.0);
    let engine = recommender(provider, store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), false).await;

    assert_eq!(engine.provider().calls(), Mode::ALL.to_vec());
    assert!(!result.used_fallback);
    assert_eq!(result.modes(), vec![Mode::Metro]);
    assert_eq!(result.recommendations[0].cost, 70.0);
}

#[tokio::test]
async fn discovery_keeps_canonical_order() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());
    let trip = trip().with_mode_preferences("taxi, bus");

    let discovery = engine.discover_candidates(&trip, &trip.preferences()).await;

    let modes: Vec<Mode> = discovery.candidates.iter().map(|c| c.mode).collect();
    assert_eq!(modes, vec![Mode::Bus, Mode::Taxi]);
    assert_eq!(discovery.candidates[0].distance_meters, Some(10_000.0));
}

#[tokio::test]
async fn model_scores_and_sorts() {
    // Score rises with the mode index, so taxi wins.
    let (_dir, store) = model_store(&linear(0.1, 4, 0.2), None);
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert!(result.used_model);
    assert_eq!(
        result.modes(),
        vec![Mode::Taxi, Mode::RideShare, Mode::Metro, Mode::Bus]
    );
    assert_close(result.recommendations[0].score, 0.7);
    assert_close(result.recommendations[3].score, 0.1);
}

#[tokio::test]
async fn model_is_ignored_when_disabled() {
    let (_dir, store) = model_store(&linear(0.1, 4, 0.2), None);
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), false).await;

    assert!(!result.used_model);
    assert_eq!(result.modes()[0], Mode::Metro);
}

#[tokio::test]
async fn corrupt_model_falls_back_to_rules() {
    let (_dir, store) = model_store("{\"kind\": \"forest\"", None);
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert!(!result.used_model);
    assert_close(result.recommendations[0].score, 0.85);
}

#[tokio::test]
async fn inference_failure_scores_uniformly() {
    let cyclic = r#"{
        "kind": "forest",
        "trees": [{"nodes": [
            {"feature": 0, "threshold": 1000.0, "left": 1, "right": 1},
            {"feature": 0, "threshold": 1000.0, "left": 0, "right": 0}
        ]}]
    }"#;
    let (_dir, store) = model_store(cyclic, None);
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert!(result.used_model);
    assert_eq!(result.len(), 4);
    assert!(result.recommendations.iter().all(|r| r.score == 0.5));
    // A stable sort of equal scores leaves discovery order.
    assert_eq!(result.modes(), Mode::ALL.to_vec());
}

#[tokio::test]
async fn model_scores_clamped_when_configured() {
    // Bus scores 2.0 down to taxi at -1.0.
    let model = linear(2.0, 4, -1.0);

    let (_raw_dir, store) = model_store(&model, None);
    let raw = recommender(MockProvider::city(), store, ScoringConfig::default())
        .generate_recommendations(&trip(), true)
        .await;
    assert_close(raw.recommendations[0].score, 2.0);
    assert_close(raw.recommendations[3].score, -1.0);

    let (_clamped_dir, store) = model_store(&model, None);
    let clamped = recommender(MockProvider::city(), store, ScoringConfig::new(true, true))
        .generate_recommendations(&trip(), true)
        .await;
    assert!(
        clamped
            .recommendations
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.score))
    );
    assert_eq!(clamped.recommendations[0].mode, Mode::Bus);
    assert_close(clamped.recommendations[0].score, 1.0);
    assert_close(clamped.recommendations[3].score, 0.0);
}

#[tokio::test]
async fn model_uses_metadata_cost_scale() {
    // Score is the normalized cost; metadata sets the divisor to 100.
    let (_dir, store) = model_store(
        &linear(0.0, 10, 1.0),
        Some(r#"{"cost_normalizer": 100.0}"#),
    );
    let provider = MockProvider::new().with_route(Mode::Bus, 2400.0, 10_000.0);
    let engine = recommender(provider, store, ScoringConfig::default());

    let result = engine.generate_recommendations(&trip(), true).await;

    assert!(result.used_model);
    // Bus over 10 km costs 40.
    assert_close(result.recommendations[0].score, 0.4);
}

#[tokio::test]
async fn route_for_passes_through() {
    let (_dir, store) = no_model();
    let engine = recommender(MockProvider::city(), store, ScoringConfig::default());

    let route = engine.route_for("Saddar", "Blue Area", Mode::Taxi).await.unwrap();
    assert_eq!(route.eta_minutes, 15);
    assert_eq!(route.cost, 250.0);
    assert_eq!(route.distance_meters, 10_000.0);

    let (_dir, store) = no_model();
    let missing = recommender(MockProvider::new(), store, ScoringConfig::default())
        .route_for("Saddar", "Blue Area", Mode::Taxi)
        .await;
    assert!(matches!(missing, Err(RouteError::NoRoute)));
}
