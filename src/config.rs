use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const MAX_HISTORY_DAYS: u32 = 1825;

/// Where the simulator gets its randomness from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSource {
    /// Seeded by the symbol hash: the same symbol always gets the same walk.
    Seeded,
    /// Fresh entropy per request.
    Entropy,
}

impl std::str::FromStr for RandomSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seeded" => Ok(RandomSource::Seeded),
            "entropy" => Ok(RandomSource::Entropy),
            other => Err(format!(
                "Invalid MARKET_DATA_RANDOM: {}. Must be 'seeded' or 'entropy'",
                other
            )),
        }
    }
}

/// Runtime configuration, read once at startup and handed to `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream provider credential; `None` means synthetic data only.
    pub api_key: Option<String>,
    /// Upstream provider endpoint.
    pub base_url: Url,
    pub provider_timeout: Duration,
    pub random_source: RandomSource,
    pub default_history_days: u32,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            provider_timeout: Duration::from_millis(3000),
            random_source: RandomSource::Seeded,
            default_history_days: 30,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup("ALPHAVANTAGE_API_KEY").filter(|key| !key.trim().is_empty());

        let base_url = match lookup("MARKET_DATA_BASE_URL") {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| format!("MARKET_DATA_BASE_URL is not a valid URL: {}", e))?,
            None => defaults.base_url,
        };

        let provider_timeout = match lookup("PROVIDER_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .map_err(|_| format!("PROVIDER_TIMEOUT_MS must be milliseconds, got {}", raw))?,
            ),
            None => defaults.provider_timeout,
        };

        let random_source = match lookup("MARKET_DATA_RANDOM") {
            Some(raw) => raw.parse::<RandomSource>()?,
            None => defaults.random_source,
        };

        let default_history_days = match lookup("DEFAULT_HISTORY_DAYS") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("DEFAULT_HISTORY_DAYS must be a number, got {}", raw))?,
            None => defaults.default_history_days,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| format!("BIND_ADDR is not a socket address: {}", e))?,
            None => defaults.bind_addr,
        };

        let config = Self {
            api_key,
            base_url,
            provider_timeout,
            random_source,
            default_history_days,
            bind_addr,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_history_days == 0 || self.default_history_days > MAX_HISTORY_DAYS {
            return Err(format!(
                "DEFAULT_HISTORY_DAYS must be between 1 and {}",
                MAX_HISTORY_DAYS
            ));
        }
        if self.provider_timeout.is_zero() {
            return Err("PROVIDER_TIMEOUT_MS must be greater than zero".to_string());
        }
        Ok(())
    }
}
