use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::geo::validate_coordinates;
use crate::geofence::{evaluate, ConfidenceLevel};
use crate::location::{Building, BuildingQuery, LocationError};
use crate::quality::{LocationPoint, LocationQuality};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        let status = match e {
            LocationError::NotFound(_) => StatusCode::NOT_FOUND,
            LocationError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            LocationError::Network(_) | LocationError::InvalidResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        api_error(status, e.to_string())
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Geocoding ───────────────────────────────────────────────────

/// Run the (blocking) geocoder off the async executor.
async fn lookup_building(state: &AppState, query: BuildingQuery) -> Result<Building, ApiError> {
    let geocoder = Arc::clone(&state.geocoder);
    let result = tokio::task::spawn_blocking(move || geocoder.lookup(&query))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Lookup task failed: {}", e)))?;

    result.map_err(|e| {
        warn!(error = %e, "building lookup failed");
        ApiError::from(e)
    })
}

// ─── POST /api/building ──────────────────────────────────────────

pub async fn get_building(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BuildingQuery>,
) -> Result<Json<Building>, ApiError> {
    let start = Instant::now();

    if !state.courtesy_delay.is_zero() {
        tokio::time::sleep(state.courtesy_delay).await;
    }

    let building = lookup_building(&state, request).await?;

    info!(
        building = %building.name,
        lat = building.lat,
        lng = building.lng,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/building"
    );

    Ok(Json(building))
}

// ─── POST /api/check-location ────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationCheckRequest {
    pub building_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub user_location: LocationPoint,
    /// Earlier readings, oldest first.
    #[serde(default)]
    pub location_history: Option<Vec<LocationPoint>>,
}

#[derive(Serialize)]
pub struct LocationCheckResponse {
    pub is_within_range: bool,
    pub distance: f64,
    pub confidence_level: ConfidenceLevel,
    pub building: Building,
    pub location_quality: LocationQuality,
}

pub async fn check_location(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationCheckRequest>,
) -> Result<Json<LocationCheckResponse>, ApiError> {
    let start = Instant::now();

    let user = request.user_location;
    validate_coordinates(user.lat, user.lng).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    for p in request.location_history.iter().flatten() {
        validate_coordinates(p.lat, p.lng)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("location_history: {}", e)))?;
    }

    let query = BuildingQuery {
        name: request.building_name,
        city: request.city,
        country: request.country,
    };
    let building = lookup_building(&state, query).await?;

    let verdict = evaluate(&user, &building, request.location_history.as_deref());

    info!(
        building = %building.name,
        distance = verdict.distance,
        within = verdict.is_within_range,
        confidence = %verdict.confidence_level,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/check-location"
    );

    Ok(Json(LocationCheckResponse {
        is_within_range: verdict.is_within_range,
        distance: verdict.distance,
        confidence_level: verdict.confidence_level,
        building,
        location_quality: verdict.location_quality,
    }))
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
