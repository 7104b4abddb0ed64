use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::external::quote_provider::{
    resolve_payload, ProviderFunction, ProviderResponse, QuoteProvider, QuoteProviderError,
};
use crate::services::rate_limiter::RateLimiter;

/// Free tier allowance.
const REQUESTS_PER_MINUTE: u32 = 5;

pub struct AlphaVantageProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
    timeout: Duration,
    limiter: RateLimiter,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, base_url: Url, timeout: Duration) -> Result<Self, QuoteProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            timeout,
            limiter: RateLimiter::per_minute(REQUESTS_PER_MINUTE as usize, REQUESTS_PER_MINUTE),
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> QuoteProviderError {
        if err.is_timeout() {
            QuoteProviderError::Timeout(self.timeout.as_millis() as u64)
        } else {
            QuoteProviderError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn fetch(
        &self,
        symbol: &str,
        function: ProviderFunction,
    ) -> Result<ProviderResponse, QuoteProviderError> {
        let Some(_guard) = self.limiter.try_acquire() else {
            debug!(
                "Alpha Vantage throttle full, {} refused (next slot in {:?})",
                symbol,
                self.limiter.retry_after()
            );
            return Err(QuoteProviderError::RateLimited);
        };

        let mut query = vec![
            ("function", function.as_param()),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];
        if function == ProviderFunction::DailySeries {
            // compact = latest ~100 trading days
            query.push(("outputsize", "compact"));
        }

        let resp = self
            .client
            .get(self.base_url.clone())
            .query(&query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(QuoteProviderError::RateLimited),
            StatusCode::NOT_FOUND => return Err(QuoteProviderError::NotFound(symbol.to_string())),
            status if !status.is_success() => {
                return Err(QuoteProviderError::BadResponse(format!("HTTP {}", status)))
            }
            _ => {}
        }

        let body = resp
            .json::<Value>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        resolve_payload(body)
    }
}
