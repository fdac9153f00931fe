use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::error::Error;
use crate::trending;
use crate::utils::parse_date;

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistinctCoinsResponse {
    pub distinct_coins: Vec<String>,
}

/// `GET /distinct_coins/?start_date=&end_date=` — coins that trended in
/// the inclusive range. An empty result renders as 404 here; the core
/// itself treats empty as a valid answer.
pub async fn distinct_coins(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<DistinctCoinsResponse>, ApiError> {
    let start = parse_date(&params.start_date)?;
    let end = parse_date(&params.end_date)?;

    let coins = trending::distinct_coins(&state.postgres, start, end).await?;
    if coins.is_empty() {
        return Err(Error::NotFound("No coins found for the given date range.".to_string()).into());
    }

    Ok(Json(DistinctCoinsResponse {
        distinct_coins: coins,
    }))
}
