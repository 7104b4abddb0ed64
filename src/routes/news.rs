use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::{NewsItem, NewsQueryParams};
use crate::services::news_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_news))
        .route("/categories", get(get_categories))
}

async fn get_news(Query(params): Query<NewsQueryParams>) -> Json<Vec<NewsItem>> {
    info!("GET /news - category={:?} q={:?}", params.category, params.q);
    Json(news_service::filter_news(&params))
}

async fn get_categories() -> Json<&'static [&'static str]> {
    Json(news_service::CATEGORIES)
}
