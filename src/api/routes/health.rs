use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::{ApiError, AppState};

/// `GET /health` — verifies the store connection is alive.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.postgres.health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}
