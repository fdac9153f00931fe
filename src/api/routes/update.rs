use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use log::info;
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::trending::{self, IngestFailure};

#[derive(Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub coins_added: Vec<String>,
    pub coins_skipped: Vec<String>,
    pub failures: Vec<IngestFailure>,
}

/// `POST /update/` — fetch the current trending list and ingest the top N
/// for today (UTC).
///
/// Per-entry store failures are reported in the body but do not fail the
/// request; the entries that committed stay committed.
pub async fn run_update(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let mut coins = state.provider.trending_coins().await?;
    coins.truncate(state.trending_top_n);

    let today = Utc::now().date_naive();
    let report = trending::ingest(&state.postgres, &coins, today).await;

    info!(
        "Trending refresh for {}: {} inserted, {} skipped, {} failed",
        today,
        report.inserted.len(),
        report.skipped.len(),
        report.failed.len()
    );

    Ok(Json(UpdateResponse {
        message: "Trending coins added successfully!".to_string(),
        coins_added: report.inserted,
        coins_skipped: report.skipped,
        failures: report.failed,
    }))
}
