pub mod alphavantage;
pub mod quote_provider;
