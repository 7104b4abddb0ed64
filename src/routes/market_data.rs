use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::MarketDataResponse;
use crate::routes::validation::{optional_json, parse_days, parse_mode, validate_symbol};
use crate::services::market_data_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_market_data)
            .post(post_market_data)
            .options(options_market_data),
    )
}

/// Bare OPTIONS without preflight headers; CORS headers come from the layers.
pub async fn options_market_data() -> StatusCode {
    StatusCode::OK
}

/// Query string for `/api/market-data`. Everything is optional here so
/// that validation, not extraction, produces the error body.
#[derive(Debug, Default, Deserialize)]
pub struct MarketDataParams {
    pub symbol: Option<String>,
    pub function: Option<String>,
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketDataBody {
    pub symbol: Option<String>,
    pub function: Option<String>,
    pub days: Option<DaysField>,
}

/// Dashboards send `days` both as a number and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DaysField {
    Number(i64),
    Text(String),
}

impl DaysField {
    fn into_raw(self) -> String {
        match self {
            DaysField::Number(n) => n.to_string(),
            DaysField::Text(s) => s,
        }
    }
}

pub async fn get_market_data(
    State(state): State<AppState>,
    Query(params): Query<MarketDataParams>,
) -> Result<Json<MarketDataResponse>, AppError> {
    info!("GET /market-data - symbol={:?} function={:?}", params.symbol, params.function);
    respond(&state, params).await
}

/// Same as GET; fields in a JSON body win over the query string.
pub async fn post_market_data(
    State(state): State<AppState>,
    Query(query): Query<MarketDataParams>,
    body: Bytes,
) -> Result<Json<MarketDataResponse>, AppError> {
    let body = optional_json::<MarketDataBody>(&body)?.unwrap_or_default();
    let params = MarketDataParams {
        symbol: body.symbol.or(query.symbol),
        function: body.function.or(query.function),
        days: body.days.map(DaysField::into_raw).or(query.days),
    };
    info!("POST /market-data - symbol={:?} function={:?}", params.symbol, params.function);
    respond(&state, params).await
}

async fn respond(
    state: &AppState,
    params: MarketDataParams,
) -> Result<Json<MarketDataResponse>, AppError> {
    let symbol = validate_symbol(params.symbol.as_deref())?;
    let mode = parse_mode(params.function.as_deref())?;
    let days = parse_days(params.days.as_deref(), state.config.default_history_days)?;

    let response = market_data_service::fetch_market_data(state, &symbol, mode, days)
        .await
        .map_err(|e| {
            error!("Failed to build market data for {}: {}", symbol, e);
            e
        })?;
    Ok(Json(response))
}
