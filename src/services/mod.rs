pub mod symbol_hash;
pub mod price_simulator;
pub mod quote_service;
pub mod market_data_service;
pub mod stock_service;
pub mod news_service;
pub mod prediction_service;
pub mod failure_cache;
pub mod rate_limiter;
