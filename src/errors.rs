use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::models::Quote;
use crate::services::price_simulator::SimulationError;

pub const MISSING_SYMBOL: &str = "Symbol parameter is required";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Unexpected failure; `mock_data` is a best-effort quote so naive
    /// clients still get a renderable body.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        mock_data: Option<Quote>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mock_data: Option<Quote>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody { error: msg, mock_data: None },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody { error: msg, mock_data: None },
            ),
            AppError::Internal { message, mock_data } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody { error: message, mock_data },
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SimulationError> for AppError {
    fn from(value: SimulationError) -> Self {
        match value {
            SimulationError::InvalidArgument(msg) => AppError::Validation(msg),
        }
    }
}
