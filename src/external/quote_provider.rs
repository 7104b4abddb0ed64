use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::PricePoint;

/// Which upstream endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFunction {
    GlobalQuote,
    DailySeries,
}

impl ProviderFunction {
    pub fn as_param(self) -> &'static str {
        match self {
            ProviderFunction::GlobalQuote => "GLOBAL_QUOTE",
            ProviderFunction::DailySeries => "TIME_SERIES_DAILY",
        }
    }
}

/// Typed latest quote from a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalQuote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

/// A provider payload, classified once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    GlobalQuote(GlobalQuote),
    /// Ascending by date.
    DailySeries(Vec<PricePoint>),
    /// A well-formed body we have no typed shape for.
    RawPassthrough(Value),
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timed out after {0} ms")]
    Timeout(u64),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("symbol not found: {0}")]
    NotFound(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        symbol: &str,
        function: ProviderFunction,
    ) -> Result<ProviderResponse, QuoteProviderError>;
}

#[derive(Debug, Deserialize)]
struct AvGlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "09. change")]
    change: String,
    // e.g. "-0.6543%"
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

#[derive(Debug, Deserialize)]
struct AvDailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Classify a raw Alpha Vantage style body.
///
/// Throttle notices (`Note`, `Information`) become `RateLimited`, an empty
/// `Global Quote` object means the symbol is unknown, and anything without
/// a recognised key is passed through untouched.
pub fn resolve_payload(body: Value) -> Result<ProviderResponse, QuoteProviderError> {
    let Some(object) = body.as_object() else {
        return Ok(ProviderResponse::RawPassthrough(body));
    };

    if object.contains_key("Note") || object.contains_key("Information") {
        return Err(QuoteProviderError::RateLimited);
    }

    if let Some(message) = object.get("Error Message") {
        return Err(QuoteProviderError::BadResponse(
            message.as_str().unwrap_or("unknown provider error").to_string(),
        ));
    }

    if let Some(global) = object.get("Global Quote") {
        if global.as_object().map_or(true, |fields| fields.is_empty()) {
            return Err(QuoteProviderError::NotFound("empty global quote".into()));
        }
        let raw: AvGlobalQuote = serde_json::from_value(global.clone())
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;
        return parse_global_quote(&raw).map(ProviderResponse::GlobalQuote);
    }

    if let Some(series) = object.get("Time Series (Daily)") {
        let bars: BTreeMap<String, AvDailyBar> = serde_json::from_value(series.clone())
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;
        // BTreeMap keys are ISO dates, so iteration is already ascending
        let points = bars
            .iter()
            .map(|(date, bar)| parse_daily_bar(date, bar))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ProviderResponse::DailySeries(points));
    }

    Ok(ProviderResponse::RawPassthrough(body))
}

fn parse_global_quote(raw: &AvGlobalQuote) -> Result<GlobalQuote, QuoteProviderError> {
    Ok(GlobalQuote {
        price: parse_number(&raw.price, &raw.symbol)?,
        change: parse_number(&raw.change, &raw.symbol)?,
        change_percent: parse_number(raw.change_percent.trim_end_matches('%'), &raw.symbol)?,
        high: parse_number(&raw.high, &raw.symbol)?,
        low: parse_number(&raw.low, &raw.symbol)?,
        volume: parse_volume(&raw.volume)?,
    })
}

fn parse_daily_bar(date: &str, bar: &AvDailyBar) -> Result<PricePoint, QuoteProviderError> {
    Ok(PricePoint {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?,
        open: parse_number(&bar.open, date)?,
        high: parse_number(&bar.high, date)?,
        low: parse_number(&bar.low, date)?,
        close: parse_number(&bar.close, date)?,
        volume: parse_volume(&bar.volume)?,
    })
}

fn parse_number(raw: &str, context: &str) -> Result<f64, QuoteProviderError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| QuoteProviderError::Parse(format!("{} ({}): {}", raw, context, e)))
}

fn parse_volume(raw: &str) -> Result<u64, QuoteProviderError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| QuoteProviderError::Parse(format!("volume {}: {}", raw, e)))
}
