use std::sync::Arc;
use chrono::{DateTime, Utc, Duration};
use dashmap::DashMap;

use crate::external::quote_provider::QuoteProviderError;

/// A remembered upstream failure for one symbol
#[derive(Debug, Clone)]
pub struct FailureInfo {
    pub failed_at: DateTime<Utc>,
    pub failure_type: FailureType,
    pub ttl: Duration,
}

impl FailureInfo {
    pub fn retry_after(&self) -> DateTime<Utc> {
        self.failed_at + self.ttl
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureType {
    NotFound,
    RateLimited,
    ApiError,
}

impl FailureType {
    fn ttl(self) -> Duration {
        match self {
            FailureType::NotFound => Duration::hours(24),
            // Alpha Vantage quotas are per minute
            FailureType::RateLimited => Duration::minutes(1),
            FailureType::ApiError => Duration::minutes(5),
        }
    }
}

impl From<&QuoteProviderError> for FailureType {
    fn from(err: &QuoteProviderError) -> Self {
        match err {
            QuoteProviderError::NotFound(_) => FailureType::NotFound,
            QuoteProviderError::RateLimited => FailureType::RateLimited,
            _ => FailureType::ApiError,
        }
    }
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureType::NotFound => write!(f, "not_found"),
            FailureType::RateLimited => write!(f, "rate_limited"),
            FailureType::ApiError => write!(f, "api_error"),
        }
    }
}

/// Symbols whose upstream lookups recently failed.
///
/// While an entry is live the market data service goes straight to the
/// simulator instead of calling the provider again.
#[derive(Clone, Default)]
pub struct FailureCache {
    cache: Arc<DashMap<String, FailureInfo>>,
}

impl FailureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live failure for `symbol`, evicting it if it has expired.
    pub fn is_failed(&self, symbol: &str) -> Option<FailureInfo> {
        if let Some(entry) = self.cache.get(symbol) {
            let info = entry.value().clone();
            if Utc::now() < info.retry_after() {
                return Some(info);
            }
            drop(entry);
            self.cache.remove(symbol);
        }
        None
    }

    pub fn record_failure(&self, symbol: &str, failure_type: FailureType) {
        self.record_failure_at(symbol, failure_type, Utc::now());
    }

    fn record_failure_at(&self, symbol: &str, failure_type: FailureType, failed_at: DateTime<Utc>) {
        let info = FailureInfo {
            failed_at,
            failure_type,
            ttl: failure_type.ttl(),
        };
        self.cache.insert(symbol.to_string(), info);
    }

    pub fn clear(&self, symbol: &str) {
        self.cache.remove(symbol);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_records_and_retrieves_failures() {
        let cache = FailureCache::new();

        cache.record_failure("INVALID", FailureType::NotFound);

        let result = cache.is_failed("INVALID");
        assert!(result.is_some());
        assert_eq!(result.unwrap().failure_type, FailureType::NotFound);
    }

    #[test]
    fn test_cache_clears_symbol() {
        let cache = FailureCache::new();

        cache.record_failure("TEST", FailureType::ApiError);
        assert!(cache.is_failed("TEST").is_some());

        cache.clear("TEST");
        assert!(cache.is_failed("TEST").is_none());
    }

    #[test]
    fn test_different_ttls_for_failure_types() {
        let cache = FailureCache::new();

        cache.record_failure("NOT_FOUND", FailureType::NotFound);
        cache.record_failure("RATE_LIMITED", FailureType::RateLimited);

        assert_eq!(cache.is_failed("NOT_FOUND").unwrap().ttl, Duration::hours(24));
        assert_eq!(cache.is_failed("RATE_LIMITED").unwrap().ttl, Duration::minutes(1));
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let cache = FailureCache::new();
        cache.record_failure_at("OLD", FailureType::RateLimited, Utc::now() - Duration::minutes(2));
        assert_eq!(cache.len(), 1);

        assert!(cache.is_failed("OLD").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_failure_type_from_provider_error() {
        assert_eq!(
            FailureType::from(&QuoteProviderError::NotFound("X".into())),
            FailureType::NotFound
        );
        assert_eq!(FailureType::from(&QuoteProviderError::RateLimited), FailureType::RateLimited);
        assert_eq!(FailureType::from(&QuoteProviderError::Timeout(10)), FailureType::ApiError);
    }
}
