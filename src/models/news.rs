use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction a news item is expected to push the sectors it mentions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImpactDirection {
    Up,
    Down,
}

impl std::fmt::Display for ImpactDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactDirection::Up => write!(f, "up"),
            ImpactDirection::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsImpact {
    pub direction: ImpactDirection,
    /// 1 (minor) to 3 (major)
    pub strength: u8,
    pub sectors: Vec<String>,
}

/// A single market news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub impact: NewsImpact,
    /// Tickers the item is about; empty for general market news.
    pub symbols: Vec<String>,
}

/// Request parameters for the news feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsQueryParams {
    /// Category filter; "All" or absent means no filter
    pub category: Option<String>,
    /// Case-insensitive search over title and summary
    pub q: Option<String>,
}
