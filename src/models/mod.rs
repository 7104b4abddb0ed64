mod price_point;
mod quote;
mod stock;
mod news;
mod prediction;

pub use price_point::{PricePoint, PriceSeries};
pub use quote::{MarketDataMode, MarketDataResponse, Quote};
pub use stock::{CatalogEntry, StockDetail, StockSearchParams, StockSummary, SuccessEnvelope};
pub use news::{ImpactDirection, NewsImpact, NewsItem, NewsQueryParams};
pub use prediction::{CreatePrediction, Prediction, PredictionDirection};
