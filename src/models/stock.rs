use serde::{Deserialize, Serialize};

use crate::models::{NewsItem, PricePoint, Quote};

/// A ticker the dashboard knows how to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub name: &'static str,
}

// Listing row consumed by the portfolio page (snake_case on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: String,
}

impl StockSummary {
    pub fn from_quote(name: &str, quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: name.to_string(),
            current_price: quote.price,
            change: quote.change,
            change_percent: quote.change_percent.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StockDetail {
    pub stock: StockSummary,
    pub prices: Vec<PricePoint>,
    pub news: Vec<NewsItem>,
}

/// `{ "success": true, "data": ... }` wrapper used by the stock routes.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockSearchParams {
    #[serde(default)]
    pub q: Option<String>,
}
