//! Financial summary routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use meridian_core::financial::{
    FinancialData, FinancialSnapshot, format_period, operating_margin, target_achievement,
};
use meridian_db::{FinancialRepository, SubsidiaryRepository};
use meridian_shared::{AppError, types::SubsidiaryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{ApiError, ApiResult, AppState};

const DEFAULT_TREND_QUARTERS: u64 = 4;
const NO_FINANCIAL_DATA: &str = "No financial data available for this subsidiary.";

/// Creates the financial routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subsidiaries/{id}/financials/latest", get(latest_for_subsidiary))
        .route("/subsidiaries/{id}/financials/trend", get(trend_for_subsidiary))
        .route("/financials/latest", get(all_latest))
}

/// Query for the trend endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct TrendQuery {
    /// Number of quarters, newest first.
    #[validate(range(min = 1, max = 40))]
    pub quarters: Option<u64>,
}

/// One quarter of a trend chart.
#[derive(Debug, Serialize)]
pub struct TrendPoint {
    /// Stored figures.
    #[serde(flatten)]
    pub data: FinancialData,
    /// `YYYY QN`.
    pub period_label: String,
    /// Operating profit over revenue, in percent.
    pub operating_margin: Decimal,
    /// Revenue over target, in percent.
    pub target_achievement: Decimal,
}

impl From<FinancialData> for TrendPoint {
    fn from(data: FinancialData) -> Self {
        Self {
            period_label: format_period(data.fiscal_year, data.quarter),
            operating_margin: operating_margin(data.operating_profit.unwrap_or_default(), data.revenue),
            target_achievement: target_achievement(data.revenue, data.target_revenue),
            data,
        }
    }
}

/// Response for the trend endpoint.
#[derive(Debug, Serialize)]
pub struct TrendResponse {
    /// Subsidiary the trend belongs to.
    pub subsidiary_id: SubsidiaryId,
    /// Quarters, newest first.
    pub trend: Vec<TrendPoint>,
}

/// Response for the latest period across subsidiaries.
#[derive(Debug, Serialize)]
pub struct LatestPeriodResponse {
    /// `YYYY QN` of the latest period, if any data exists.
    pub period: Option<String>,
    /// One snapshot per subsidiary reporting in that period.
    pub financials: Vec<FinancialSnapshot>,
}

/// GET `/subsidiaries/{id}/financials/latest` - Latest quarter for a subsidiary.
async fn latest_for_subsidiary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FinancialSnapshot>> {
    let subsidiary_id = SubsidiaryId::from_uuid(id);
    let (data, subsidiary) = FinancialRepository::new((*state.db).clone())
        .latest_for(subsidiary_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_FINANCIAL_DATA.to_string()))?;

    Ok(Json(FinancialSnapshot::new(data, subsidiary)))
}

/// GET `/subsidiaries/{id}/financials/trend` - Last N quarters for a subsidiary.
async fn trend_for_subsidiary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<Json<TrendResponse>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let subsidiary_id = SubsidiaryId::from_uuid(id);
    let quarters = query.quarters.unwrap_or(DEFAULT_TREND_QUARTERS);

    let subsidiaries = SubsidiaryRepository::new((*state.db).clone());
    let financials = FinancialRepository::new((*state.db).clone());
    let (subsidiary, trend) = futures::try_join!(
        async { subsidiaries.find_by_id(subsidiary_id).await.map_err(ApiError::from) },
        async { financials.trend(subsidiary_id, quarters).await.map_err(ApiError::from) },
    )?;

    if subsidiary.is_none() || trend.is_empty() {
        return Err(AppError::NotFound(NO_FINANCIAL_DATA.to_string()).into());
    }

    Ok(Json(TrendResponse {
        subsidiary_id,
        trend: trend.into_iter().map(TrendPoint::from).collect(),
    }))
}

/// GET `/financials/latest` - Every subsidiary's figures for the latest period.
async fn all_latest(State(state): State<AppState>) -> ApiResult<Json<LatestPeriodResponse>> {
    let rows = FinancialRepository::new((*state.db).clone())
        .all_latest()
        .await?;

    let period = rows
        .first()
        .map(|(data, _)| format_period(data.fiscal_year, data.quarter));
    let financials = rows
        .into_iter()
        .map(|(data, subsidiary)| FinancialSnapshot::new(data, subsidiary))
        .collect();

    Ok(Json(LatestPeriodResponse { period, financials }))
}
