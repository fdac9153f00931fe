use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::routes::coins::DistinctCoinsResponse;
use crate::api::ApiError;
use crate::expo::CollectorClient;
use crate::stats::{build_ratio_curve, RatioPoint};
use crate::utils::{ensure_ordered, parse_date};

pub struct ExpoState {
    pub collector: CollectorClient,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeBody {
    pub start_date: String,
    pub end_date: String,
}

/// `POST /trending_range/` — passthrough to the collector's distinct-coin
/// query. Collector failures (including its 404 on an empty range) keep
/// their status.
pub async fn trending_range(
    State(state): State<Arc<ExpoState>>,
    Json(body): Json<DateRangeBody>,
) -> Result<Json<DistinctCoinsResponse>, ApiError> {
    let start = parse_date(&body.start_date)?;
    let end = parse_date(&body.end_date)?;
    ensure_ordered(start, end)?;

    let coins = state
        .collector
        .distinct_coins(&body.start_date, &body.end_date)
        .await?;
    Ok(Json(coins))
}

#[derive(Debug, Deserialize)]
pub struct CurveParams {
    pub coin_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// `GET /coin_price_curve/?coin_id=&start_date=&end_date=` — fetches the
/// daily buckets from the collector and normalizes them against the first
/// day's average.
pub async fn coin_price_curve(
    State(state): State<Arc<ExpoState>>,
    Query(params): Query<CurveParams>,
) -> Result<Json<Vec<RatioPoint>>, ApiError> {
    let start = parse_date(&params.start_date)?;
    let end = parse_date(&params.end_date)?;
    ensure_ordered(start, end)?;

    let daily = state
        .collector
        .daily_summaries(&params.coin_id, &params.start_date, &params.end_date)
        .await?;

    Ok(Json(build_ratio_curve(&daily)?))
}

/// `GET /health` — liveness only; the expo service holds no connections.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
