use std::sync::LazyLock;

use axum::body::Bytes;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::config::MAX_HISTORY_DAYS;
use crate::errors::{AppError, MISSING_SYMBOL};
use crate::models::MarketDataMode;

// Letters, digits and the punctuation used by index/class/exchange suffixes
static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.\-\^=:]{1,20}$").expect("symbol pattern compiles")
});

/// Missing or blank symbols get the fixed "required" message; anything
/// else that is not ticker-shaped is rejected verbatim.
pub fn validate_symbol(raw: Option<&str>) -> Result<String, AppError> {
    let symbol = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(AppError::Validation(MISSING_SYMBOL.to_string())),
    };

    if !SYMBOL_PATTERN.is_match(symbol) {
        return Err(AppError::Validation(format!("Invalid symbol: {:?}", symbol)));
    }
    Ok(symbol.to_string())
}

pub fn parse_days(raw: Option<&str>, default_days: u32) -> Result<u32, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default_days);
    };

    let days = raw
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("days must be a whole number, got {}", raw)))?;

    if days < 1 || days > i64::from(MAX_HISTORY_DAYS) {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {}, got {}",
            MAX_HISTORY_DAYS, days
        )));
    }
    Ok(days as u32)
}

/// Parse an optional JSON request body.
///
/// An empty (or whitespace-only) body is `None`; anything else must be
/// valid JSON for `T` or the request is rejected with the parse error.
pub fn optional_json<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
}

pub fn parse_mode(raw: Option<&str>) -> Result<MarketDataMode, AppError> {
    MarketDataMode::parse(raw).ok_or_else(|| {
        AppError::Validation(format!("Unsupported function: {}", raw.unwrap_or_default()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_symbols() {
        for raw in [None, Some(""), Some("   ")] {
            match validate_symbol(raw) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, MISSING_SYMBOL),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_accepts_common_ticker_shapes() {
        for raw in ["AAPL", "BRK.B", "RY.TO", "^GSPC", "EURUSD=X", "btc-usd"] {
            assert_eq!(validate_symbol(Some(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn test_rejects_odd_symbols() {
        for raw in ["AAPL ", "A/B", "DROP TABLE", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"] {
            assert!(matches!(validate_symbol(Some(raw)), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_days_parsing() {
        assert_eq!(parse_days(None, 30).unwrap(), 30);
        assert_eq!(parse_days(Some(""), 30).unwrap(), 30);
        assert_eq!(parse_days(Some("90"), 30).unwrap(), 90);
        assert!(parse_days(Some("0"), 30).is_err());
        assert!(parse_days(Some("-5"), 30).is_err());
        assert!(parse_days(Some("ten"), 30).is_err());
        assert!(parse_days(Some("100000"), 30).is_err());
    }

    #[test]
    fn test_mode_parsing_errors() {
        assert_eq!(parse_mode(Some("GLOBAL_QUOTE")).unwrap(), MarketDataMode::Quote);
        assert!(matches!(parse_mode(Some("INTRADAY")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_optional_json_body() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            symbol: Option<String>,
        }

        assert!(optional_json::<Body>(&Bytes::new()).unwrap().is_none());
        assert!(optional_json::<Body>(&Bytes::from_static(b" \n")).unwrap().is_none());

        let parsed: Body = optional_json(&Bytes::from_static(br#"{"symbol":"AAPL"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.symbol.as_deref(), Some("AAPL"));

        match optional_json::<Body>(&Bytes::from_static(br#"{"symbol":42}"#)) {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("Invalid JSON body")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
