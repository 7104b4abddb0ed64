use crate::config::RandomSource;
use crate::errors::AppError;
use crate::models::{CatalogEntry, StockDetail, StockSummary};
use crate::services::market_data_service::synthetic_quote;
use crate::services::news_service;

/// Tickers offered by the add-stock search.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { symbol: "AAPL", name: "Apple Inc." },
    CatalogEntry { symbol: "MSFT", name: "Microsoft Corporation" },
    CatalogEntry { symbol: "GOOGL", name: "Alphabet Inc." },
    CatalogEntry { symbol: "AMZN", name: "Amazon.com Inc." },
    CatalogEntry { symbol: "META", name: "Meta Platforms Inc." },
    CatalogEntry { symbol: "TSLA", name: "Tesla Inc." },
    CatalogEntry { symbol: "NVDA", name: "NVIDIA Corporation" },
    CatalogEntry { symbol: "NFLX", name: "Netflix Inc." },
    CatalogEntry { symbol: "DIS", name: "The Walt Disney Company" },
    CatalogEntry { symbol: "JPM", name: "JPMorgan Chase & Co." },
];

pub fn find(symbol: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
}

/// Catalog entries whose symbol or name contains `query`, ignoring case.
/// A blank query matches nothing.
pub fn search(query: &str) -> Vec<CatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    CATALOG
        .iter()
        .filter(|entry| {
            entry.symbol.to_lowercase().contains(&needle)
                || entry.name.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

/// Synthetic summary row for every catalog ticker.
pub fn list_stocks(days: u32, random: RandomSource) -> Result<Vec<StockSummary>, AppError> {
    CATALOG
        .iter()
        .map(|entry| {
            let (quote, _) = synthetic_quote(entry.symbol, days, random)?;
            Ok(StockSummary::from_quote(entry.name, &quote))
        })
        .collect()
}

/// Summary, price history and related news for one symbol.
///
/// Symbols outside the catalog are still simulated; their display name is
/// the symbol itself.
pub fn stock_detail(symbol: &str, days: u32, random: RandomSource) -> Result<StockDetail, AppError> {
    let name = find(symbol).map_or(symbol, |entry| entry.name);
    let (quote, series) = synthetic_quote(symbol, days, random)?;

    Ok(StockDetail {
        stock: StockSummary::from_quote(name, &quote),
        prices: series.into_points(),
        news: news_service::for_symbol(symbol),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_symbol_and_name() {
        let by_symbol: Vec<_> = search("aap").iter().map(|e| e.symbol).collect();
        assert_eq!(by_symbol, vec!["AAPL"]);

        let by_name: Vec<_> = search("corporation").iter().map(|e| e.symbol).collect();
        assert_eq!(by_name, vec!["MSFT", "NVDA"]);
    }

    #[test]
    fn test_blank_search_is_empty() {
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
        assert!(search("zzzz").is_empty());
    }

    #[test]
    fn test_list_covers_catalog() {
        let stocks = list_stocks(30, RandomSource::Seeded).unwrap();
        assert_eq!(stocks.len(), CATALOG.len());
        assert_eq!(stocks[0].symbol, "AAPL");
        assert_eq!(stocks[0].name, "Apple Inc.");
        assert!(stocks.iter().all(|s| s.current_price > 0.0));
    }

    #[test]
    fn test_detail_for_unknown_symbol_uses_symbol_as_name() {
        let detail = stock_detail("ZZZ", 10, RandomSource::Seeded).unwrap();
        assert_eq!(detail.stock.name, "ZZZ");
        assert_eq!(detail.prices.len(), 11);
    }

    #[test]
    fn test_detail_price_matches_history() {
        let detail = stock_detail("TSLA", 30, RandomSource::Seeded).unwrap();
        assert_eq!(detail.stock.name, "Tesla Inc.");
        assert_eq!(detail.stock.current_price, detail.prices.last().unwrap().close);
        assert!(!detail.news.is_empty());
    }
}
