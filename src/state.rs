use std::sync::Arc;
use crate::config::AppConfig;
use crate::external::quote_provider::QuoteProvider;
use crate::services::failure_cache::FailureCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no provider credential is configured.
    pub quote_provider: Option<Arc<dyn QuoteProvider>>,
    pub failure_cache: FailureCache,
}

impl AppState {
    pub fn new(config: AppConfig, quote_provider: Option<Arc<dyn QuoteProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            quote_provider,
            failure_cache: FailureCache::new(),
        }
    }
}
