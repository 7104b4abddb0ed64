use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{CatalogEntry, StockDetail, StockSearchParams, StockSummary, SuccessEnvelope};
use crate::routes::validation::{parse_days, validate_symbol};
use crate::services::stock_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stocks", get(list_stocks))
        .route("/stocks/:symbol", get(get_stock))
        .route("/search", get(search_stocks))
}

#[derive(Debug, Default, Deserialize)]
pub struct DaysParams {
    pub days: Option<String>,
}

pub async fn list_stocks(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Result<Json<SuccessEnvelope<Vec<StockSummary>>>, AppError> {
    info!("GET /market-data/stocks - Listing catalog stocks");
    let days = parse_days(params.days.as_deref(), state.config.default_history_days)?;
    let stocks = stock_service::list_stocks(days, state.config.random_source)?;
    Ok(Json(SuccessEnvelope::new(stocks)))
}

pub async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Result<Json<SuccessEnvelope<StockDetail>>, AppError> {
    info!("GET /market-data/stocks/{} - Getting stock detail", symbol);
    let symbol = validate_symbol(Some(symbol.as_str()))?;
    let days = parse_days(params.days.as_deref(), state.config.default_history_days)?;
    let detail = stock_service::stock_detail(&symbol, days, state.config.random_source)?;
    Ok(Json(SuccessEnvelope::new(detail)))
}

pub async fn search_stocks(
    Query(params): Query<StockSearchParams>,
) -> Json<SuccessEnvelope<Vec<CatalogEntry>>> {
    info!("GET /market-data/search - q={:?}", params.q);
    let matches = stock_service::search(params.q.as_deref().unwrap_or_default());
    Json(SuccessEnvelope::new(matches))
}
