//! HTTP surface of the hub: two routes behind a permissive CORS layer.
//!
//! POST /sensor-data      validate-and-insert one reading
//! GET  /get-sensor-data  the 50 most recent readings, newest first
//!
//! both handlers are stateless aside from the shared store; errors are
//! converted to responses by ApiError's IntoResponse impl.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::domain::{Reading, ReadingPayload};
use crate::error::ApiError;
use crate::store::ReadingStore;

pub fn router(store: ReadingStore) -> Router {
    Router::new()
        .route("/sensor-data", post(ingest_reading))
        .route("/get-sensor-data", get(recent_readings))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// presence-check the five fields, then append exactly one row.
/// acknowledges with plain text rather than echoing the created row.
async fn ingest_reading(
    State(store): State<ReadingStore>,
    Json(payload): Json<ReadingPayload>,
) -> Result<&'static str, ApiError> {
    let reading = payload.validate()?;
    store.insert(&reading).await?;
    Ok("Data saved")
}

async fn recent_readings(
    State(store): State<ReadingStore>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    Ok(Json(store.recent().await?))
}
