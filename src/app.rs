use std::any::Any;

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::error;

use crate::errors::AppError;
use crate::routes::{health, market_data, news, predictions, stocks};
use crate::state::AppState;

/// Request headers browsers may send cross-origin.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn create_app(state: AppState) -> Router {
    let routes = Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/market-data", market_data::router().merge(stocks::router()))
        .nest("/api/news", news::router())
        .nest("/api/predictions", predictions::router())
        .fallback(route_not_found)
        .with_state(state);

    apply_layers(routes)
}

/// Panic recovery innermost, so a 500 still gets the CORS headers.
pub(crate) fn apply_layers(router: Router) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer)
        // outermost, so preflight and error responses carry the exact same value
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);

    AppError::Internal {
        message: "Internal server error".to_string(),
        mock_data: None,
    }
    .into_response()
}
