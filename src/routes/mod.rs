pub(crate) mod health;
pub(crate) mod market_data;
pub(crate) mod stocks;
pub(crate) mod news;
pub(crate) mod predictions;
pub(crate) mod validation;
