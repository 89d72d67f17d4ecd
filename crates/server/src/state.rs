//! Application state shared across handlers.

use crate::cache::VideoCache;
use reelay_core::config::AppConfig;
use reelay_upstream::VideoSource;
use std::sync::Arc;

/// Shared application state.
///
/// The cache is the only cross-request mutable state; everything else is
/// read-only after startup. All fields are cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Upstream listing source. A trait object so tests can substitute a
    /// scripted source.
    pub source: Arc<dyn VideoSource>,
    /// Expiring response cache.
    pub cache: Arc<VideoCache>,
}

impl AppState {
    /// Create a new application state. The cache is built from config here
    /// and lives for the rest of the process.
    pub fn new(config: AppConfig, source: Arc<dyn VideoSource>) -> Self {
        let cache = Arc::new(VideoCache::from_config(&config.cache));
        Self {
            config: Arc::new(config),
            source,
            cache,
        }
    }
}
