//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Mode, ParseModeError, Recommendations, TripRequest};
use crate::routing::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/recommendations",
            get(recommend_query).post(recommend_body),
        )
        .route("/api/route", get(route_map))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Recommendations for a trip given in the query string.
async fn recommend_query(
    State(state): State<AppState>,
    Query(req): Query<RecommendationQuery>,
) -> Result<Json<Recommendations>, AppError> {
    let trip = req.trip();
    check_trip(&trip)?;

    let use_model = parse_use_ml(req.use_ml.as_deref());
    let recommendations = state
        .recommender
        .generate_recommendations(&trip, use_model)
        .await;

    Ok(Json(recommendations))
}

/// Recommendations for a trip given as a JSON body.
async fn recommend_body(
    State(state): State<AppState>,
    Query(toggle): Query<ModelToggle>,
    body: Bytes,
) -> Result<Json<Recommendations>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let trip: TripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid trip body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    check_trip(&trip)?;

    let use_model = parse_use_ml(toggle.use_ml.as_deref());
    let recommendations = state
        .recommender
        .generate_recommendations(&trip, use_model)
        .await;

    Ok(Json(recommendations))
}

/// Route geometry and metrics for one mode, for map display.
async fn route_map(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let mode = match req.mode.as_deref() {
        Some(m) if !m.trim().is_empty() => m.parse::<Mode>()?,
        _ => Mode::Bus,
    };

    let origin = req.origin.trim();
    let destination = req.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(AppError::BadRequest {
            message: "origin and destination are required".into(),
        });
    }

    let route = state
        .recommender
        .route_for(origin, destination, mode)
        .await?;

    Ok(Json(RouteResponse::from_route(
        origin,
        destination,
        mode,
        &route,
    )))
}

fn check_trip(trip: &TripRequest) -> Result<(), AppError> {
    if trip.origin.trim().is_empty() || trip.destination.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "origin and destination are required".into(),
        });
    }
    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
}

impl From<ParseModeError> for AppError {
    fn from(e: ParseModeError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
