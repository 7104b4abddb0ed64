use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{CreatePrediction, Prediction};
use crate::routes::validation::{optional_json, validate_symbol};
use crate::services::prediction_service;
use crate::services::price_simulator::entropy_rng;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_prediction))
}

/// Credits are checked and decremented by the data store before the
/// dashboard calls this.
async fn create_prediction(
    body: Bytes,
) -> Result<(StatusCode, Json<Prediction>), AppError> {
    let symbol = optional_json::<CreatePrediction>(&body)?.and_then(|b| b.symbol);
    let symbol = validate_symbol(symbol.as_deref())?;
    info!("POST /predictions - Generating prediction for {}", symbol);

    let prediction = prediction_service::predict(&symbol, &mut entropy_rng());
    Ok((StatusCode::CREATED, Json(prediction)))
}
