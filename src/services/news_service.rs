use chrono::{Duration, Utc};

use crate::models::{ImpactDirection, NewsImpact, NewsItem, NewsQueryParams};

/// How many general items a symbol without tagged news gets.
const GENERAL_NEWS_LIMIT: usize = 3;

pub const CATEGORIES: &[&str] = &[
    "All", "Economy", "Markets", "Crypto", "Commodities", "Technology", "Stocks",
];

struct Seed {
    title: &'static str,
    summary: &'static str,
    category: &'static str,
    source: &'static str,
    hours_ago: i64,
    direction: ImpactDirection,
    strength: u8,
    sectors: &'static [&'static str],
    symbols: &'static [&'static str],
}

const FEED: &[Seed] = &[
    Seed {
        title: "Federal Reserve holds interest rates steady, signals potential cuts later this year",
        summary: "The Federal Reserve kept its benchmark rate unchanged but signalled that cuts may follow as inflation cools.",
        category: "Economy",
        source: "Bloomberg",
        hours_ago: 2,
        direction: ImpactDirection::Up,
        strength: 2,
        sectors: &["Banking", "Real Estate"],
        symbols: &["JPM"],
    },
    Seed {
        title: "Tech stocks surge as inflation fears ease and AI adoption accelerates",
        summary: "Large technology names rallied after softer inflation data, led by companies exposed to AI spending.",
        category: "Markets",
        source: "CNBC",
        hours_ago: 4,
        direction: ImpactDirection::Up,
        strength: 3,
        sectors: &["Technology", "Semiconductors"],
        symbols: &["NVDA", "MSFT", "GOOGL", "META"],
    },
    Seed {
        title: "Retail sales beat expectations, boosting consumer sector outlook",
        summary: "Retail sales rose faster than economists expected, pointing to resilient consumer spending.",
        category: "Economy",
        source: "Reuters",
        hours_ago: 6,
        direction: ImpactDirection::Up,
        strength: 2,
        sectors: &["Retail", "Consumer Goods"],
        symbols: &["AMZN"],
    },
    Seed {
        title: "Oil prices fall on larger than expected inventory build",
        summary: "Crude dropped more than 3% after inventories rose well above analyst estimates.",
        category: "Commodities",
        source: "Financial Times",
        hours_ago: 8,
        direction: ImpactDirection::Down,
        strength: 2,
        sectors: &["Energy", "Oil & Gas"],
        symbols: &[],
    },
    Seed {
        title: "Cryptocurrency market rebounds after weekend sell-off",
        summary: "Bitcoin climbed back toward recent highs while Ethereum gained more than 8% in 24 hours.",
        category: "Crypto",
        source: "CoinDesk",
        hours_ago: 10,
        direction: ImpactDirection::Up,
        strength: 3,
        sectors: &["Crypto", "Blockchain"],
        symbols: &[],
    },
    Seed {
        title: "EV maker cuts prices again as delivery growth slows",
        summary: "Another round of price cuts raised concerns about margins across the electric vehicle sector.",
        category: "Stocks",
        source: "Wall Street Journal",
        hours_ago: 12,
        direction: ImpactDirection::Down,
        strength: 2,
        sectors: &["Automotive"],
        symbols: &["TSLA"],
    },
    Seed {
        title: "Streaming subscriptions climb as ad-supported tiers gain traction",
        summary: "Streaming platforms reported subscriber growth driven by cheaper ad-supported plans.",
        category: "Technology",
        source: "Variety",
        hours_ago: 16,
        direction: ImpactDirection::Up,
        strength: 1,
        sectors: &["Media", "Entertainment"],
        symbols: &["NFLX", "DIS"],
    },
    Seed {
        title: "Smartphone shipments recover in holiday quarter",
        summary: "Global smartphone shipments grew for the first time in several quarters, helped by premium models.",
        category: "Technology",
        source: "IDC",
        hours_ago: 20,
        direction: ImpactDirection::Up,
        strength: 1,
        sectors: &["Hardware"],
        symbols: &["AAPL"],
    },
];

/// Whole feed, newest first.
pub fn all_news() -> Vec<NewsItem> {
    let now = Utc::now();
    FEED.iter()
        .enumerate()
        .map(|(index, seed)| NewsItem {
            id: index as u32 + 1,
            title: seed.title.to_string(),
            summary: seed.summary.to_string(),
            category: seed.category.to_string(),
            source: seed.source.to_string(),
            published_at: now - Duration::hours(seed.hours_ago),
            impact: NewsImpact {
                direction: seed.direction,
                strength: seed.strength,
                sectors: seed.sectors.iter().map(|s| s.to_string()).collect(),
            },
            symbols: seed.symbols.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// Apply the category and free-text filters from the news page.
pub fn filter_news(params: &NewsQueryParams) -> Vec<NewsItem> {
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
    let needle = params
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    all_news()
        .into_iter()
        .filter(|item| category.map_or(true, |c| item.category.eq_ignore_ascii_case(c)))
        .filter(|item| {
            needle.as_ref().map_or(true, |n| {
                item.title.to_lowercase().contains(n) || item.summary.to_lowercase().contains(n)
            })
        })
        .collect()
}

/// Items tagged with `symbol`, or the latest general market items if none are.
pub fn for_symbol(symbol: &str) -> Vec<NewsItem> {
    let news = all_news();
    let tagged: Vec<NewsItem> = news
        .iter()
        .filter(|item| item.symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol)))
        .cloned()
        .collect();

    if !tagged.is_empty() {
        return tagged;
    }

    news.into_iter()
        .filter(|item| item.symbols.is_empty())
        .take(GENERAL_NEWS_LIMIT)
        .collect()
}
