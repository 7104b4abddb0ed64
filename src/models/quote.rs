use serde::{Deserialize, Serialize};

use crate::models::PricePoint;

/// Latest-price summary for a symbol.
///
/// `is_mock` is set whenever the numbers came from the simulator rather
/// than an upstream provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    /// Percent change formatted to two decimals, e.g. `"5.00"`.
    pub change_percent: String,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub is_mock: bool,
}

/// Body of `GET|POST /api/market-data`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataResponse {
    #[serde(flatten)]
    pub quote: Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_data: Option<Vec<PricePoint>>,
}

/// What the caller asked `/api/market-data` for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataMode {
    /// Quote only.
    Quote,
    /// Quote plus the daily series it was derived from.
    History,
}

impl MarketDataMode {
    /// Accepts our own names plus the Alpha Vantage function names the
    /// dashboard already sends.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => Some(MarketDataMode::History),
            Some(s) if s.eq_ignore_ascii_case("quote") || s.eq_ignore_ascii_case("GLOBAL_QUOTE") => {
                Some(MarketDataMode::Quote)
            }
            Some(s)
                if s.eq_ignore_ascii_case("history")
                    || s.eq_ignore_ascii_case("TIME_SERIES_DAILY") =>
            {
                Some(MarketDataMode::History)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote() -> Quote {
        Quote {
            symbol: "AAPL".to_string(),
            price: 105.0,
            change: 5.0,
            change_percent: "5.00".to_string(),
            high: 106.1,
            low: 99.5,
            volume: 1_000_000,
            is_mock: true,
        }
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let value = serde_json::to_value(sample_quote()).unwrap();
        assert_eq!(value["changePercent"], "5.00");
        assert_eq!(value["isMock"], true);
        assert!(value.get("change_percent").is_none());
    }

    #[test]
    fn test_response_omits_missing_history() {
        let response = MarketDataResponse {
            quote: sample_quote(),
            historical_data: None,
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["symbol"], "AAPL");
        assert!(value.get("historicalData").is_none());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(MarketDataMode::parse(None), Some(MarketDataMode::History));
        assert_eq!(MarketDataMode::parse(Some("GLOBAL_QUOTE")), Some(MarketDataMode::Quote));
        assert_eq!(MarketDataMode::parse(Some("quote")), Some(MarketDataMode::Quote));
        assert_eq!(
            MarketDataMode::parse(Some("time_series_daily")),
            Some(MarketDataMode::History)
        );
        assert_eq!(MarketDataMode::parse(Some("INTRADAY")), None);
    }
}
