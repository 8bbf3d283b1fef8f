//! REST API endpoints for the sigmap service.
//!
//! Handlers call straight into the internally-synchronized stores; the
//! only long-running request is `POST /api/add`, whose sampling delay
//! suspends just the task serving it.
//!
//! # Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Store and
//! asset errors map onto the HTTP taxonomy: unknown ids and unresolved
//! asset paths are 404, malformed input is 4xx, disk failures are 500.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use sigmap_store::export_csv;
use sigmap_types::{Floor, Measurement, MeasurementKind};
use sigmap_wifi::SampleOptions;

use crate::assets::{AssetError, UPLOADS_PREFIX};
use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/measurements", get(list_measurements))
        .route("/api/add", post(add_measurement))
        .route("/api/export", get(export_measurements))
        .route("/api/delete/{id}", delete(delete_measurement))
        .route("/api/floors", get(list_floors))
        .route("/api/floors/add", post(add_floor))
        .route("/api/floors/upload-map/{floor_id}", post(upload_map))
        .route("/uploads/{*path}", get(serve_upload))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Floor filter query parameter.
///
/// Mirrors the lenient contract of the original client: absent or
/// non-numeric values select all floors, as does anything ≤ 0.
#[derive(Debug, Deserialize, Default)]
pub struct FloorQuery {
    pub floor: Option<String>,
}

impl FloorQuery {
    fn filter(&self) -> i64 {
        self.floor
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

/// List measurements, optionally filtered by floor.
async fn list_measurements(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FloorQuery>,
) -> Json<Vec<Measurement>> {
    Json(state.measurements.list(params.filter()))
}

/// Request body for creating a measurement.
///
/// Everything is defaulted so a minimal body samples with the standard
/// settings; an unknown `type` fails deserialization and surfaces as a
/// client error before any sampling starts.
#[derive(Debug, Deserialize)]
pub struct AddMeasurementRequest {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub floor: i64,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub kind: MeasurementKind,
    #[serde(default)]
    pub samples: i32,
    #[serde(default)]
    pub interval: i64,
}

/// Sample the Wi-Fi link and store the resulting measurement.
///
/// Sampling blocks this request for roughly `samples * interval`
/// milliseconds; concurrent requests are unaffected. The record is stored
/// even when every sample failed (the estimate is then the failure
/// sentinel).
async fn add_measurement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMeasurementRequest>,
) -> (StatusCode, Json<Measurement>) {
    let dbm = state
        .sampler
        .sample(SampleOptions {
            samples: req.samples,
            interval_ms: req.interval,
        })
        .await;

    let record = Measurement::new(dbm, req.lat, req.lng, req.floor, req.location, req.kind);
    let record = state.measurements.add(record);
    (StatusCode::CREATED, Json(record))
}

/// Delete a measurement by id.
async fn delete_measurement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.measurements.delete(&id)?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Export measurements as CSV, same floor filter as listing.
async fn export_measurements(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FloorQuery>,
) -> Result<impl IntoResponse, AppError> {
    let records = state.measurements.list(params.filter());
    let csv = export_csv(&records).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=wifi_measurements.csv",
            ),
        ],
        csv,
    ))
}

/// List all floors.
async fn list_floors(State(state): State<Arc<AppState>>) -> Json<Vec<Floor>> {
    Json(state.floors.list())
}

/// Request body for creating a floor.
#[derive(Debug, Deserialize)]
pub struct AddFloorRequest {
    #[serde(default)]
    pub name: String,
}

/// Add a floor.
async fn add_floor(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddFloorRequest>,
) -> (StatusCode, Json<Floor>) {
    let floor = state.floors.add(&req.name);
    (StatusCode::CREATED, Json(floor))
}

/// Upload a floor-plan image (multipart field `map`).
async fn upload_map(
    State(state): State<Arc<AppState>>,
    Path(floor_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let floor_id: i64 = floor_id
        .parse()
        .map_err(|_| AppError::BadRequest("invalid floor id".to_string()))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart form: {e}")))?
    {
        if field.name() == Some("map") {
            let file_name = field.file_name().unwrap_or("map").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read map field: {e}")))?;
            upload = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("missing map field".to_string()))?;

    let path = state.assets.upload(floor_id, &bytes, &file_name)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "path": path,
    })))
}

/// Serve an uploaded floor-plan image.
async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request_path = format!("{UPLOADS_PREFIX}/{path}");
    let (file, content_type) = state.assets.resolve(&request_path)?;

    let bytes = tokio::fs::read(&file).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound("file not found on server".to_string())
        } else {
            AppError::Internal(e.to_string())
        }
    })?;

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Store(sigmap_store::Error),
    Internal(String),
}

impl From<sigmap_store::Error> for AppError {
    fn from(e: sigmap_store::Error) -> Self {
        match e {
            sigmap_store::Error::MeasurementNotFound(_) | sigmap_store::Error::FloorNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            other => AppError::Store(other),
        }
    }
}

impl From<AssetError> for AppError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::FloorNotFound(id) => AppError::NotFound(format!("Floor not found: {id}")),
            AssetError::Unresolved(path) => {
                AppError::NotFound(format!("No floor map matches {path}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
