use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    /// Name of the upstream quote provider, if one is configured
    provider: Option<&'static str>,
    failing_symbols: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    info!("GET /health - Health check");
    Json(HealthStatus {
        status: "OK",
        provider: state.quote_provider.as_ref().map(|p| p.name()),
        failing_symbols: state.failure_cache.len(),
    })
}
