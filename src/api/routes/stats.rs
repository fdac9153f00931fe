use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::market::PriceSample;
use crate::stats::{bucketize_daily, summarize_range, DailySummary};
use crate::utils::{ensure_ordered, format_utc_seconds, parse_date};

/// Input shape shared by `/aboutcoin/` and `/aboutcoinDaily/`: query
/// parameters on GET, JSON body on POST. Key casing follows the wire
/// contract.
#[derive(Debug, Deserialize)]
pub struct CoinRangeParams {
    pub coin_id: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

#[derive(Serialize)]
pub struct RangeSummaryResponse {
    pub avg_price: f64,
    pub max_price: f64,
    pub max_price_date: String,
    pub min_price: f64,
    pub min_price_date: String,
}

/// Validates the dates, then fetches the price series. Validation always
/// happens before the upstream call.
async fn fetch_series(
    state: &AppState,
    params: &CoinRangeParams,
) -> Result<Vec<PriceSample>, ApiError> {
    let start = parse_date(&params.start_date)?;
    let end = parse_date(&params.end_date)?;
    ensure_ordered(start, end)?;

    Ok(state
        .provider
        .price_series(&params.coin_id, start, end)
        .await?)
}

async fn about_coin(
    state: Arc<AppState>,
    params: CoinRangeParams,
) -> Result<Json<RangeSummaryResponse>, ApiError> {
    let samples = fetch_series(&state, &params).await?;
    let summary = summarize_range(&samples)?;

    Ok(Json(RangeSummaryResponse {
        avg_price: summary.avg_price,
        max_price: summary.max_price,
        max_price_date: format_utc_seconds(summary.max_price_at),
        min_price: summary.min_price,
        min_price_date: format_utc_seconds(summary.min_price_at),
    }))
}

async fn about_coin_daily(
    state: Arc<AppState>,
    params: CoinRangeParams,
) -> Result<Json<Vec<DailySummary>>, ApiError> {
    let samples = fetch_series(&state, &params).await?;
    Ok(Json(bucketize_daily(&samples)?))
}

pub async fn about_coin_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoinRangeParams>,
) -> Result<Json<RangeSummaryResponse>, ApiError> {
    about_coin(state, params).await
}

pub async fn about_coin_post(
    State(state): State<Arc<AppState>>,
    Json(params): Json<CoinRangeParams>,
) -> Result<Json<RangeSummaryResponse>, ApiError> {
    about_coin(state, params).await
}

pub async fn about_coin_daily_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoinRangeParams>,
) -> Result<Json<Vec<DailySummary>>, ApiError> {
    about_coin_daily(state, params).await
}

pub async fn about_coin_daily_post(
    State(state): State<Arc<AppState>>,
    Json(params): Json<CoinRangeParams>,
) -> Result<Json<Vec<DailySummary>>, ApiError> {
    about_coin_daily(state, params).await
}
