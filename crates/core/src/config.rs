//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    /// Attach a permissive CORS layer (default: true). The service is meant
    /// to be called from browser frontends on arbitrary origins.
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
}

/// Upstream video-listing API configuration.
///
/// The credential cookie is the only required external value and is
/// deliberately optional here: a missing cookie is reported through the
/// diagnostic endpoint and per-request failure envelopes rather than
/// aborting startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Root of the upstream web API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix for user-facing video share links.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    /// Session cookie string granting access to the listing endpoint.
    /// Sourced from REELAY_UPSTREAM__COOKIE or the config file; never
    /// hardcoded.
    #[serde(default)]
    pub cookie: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on summaries returned per response, applied after the
    /// requested `count`. 0 disables the extra cap.
    #[serde(default)]
    pub max_videos: usize,
}

impl UpstreamConfig {
    /// Effective normalization bound for a request asking for `count` items.
    pub fn video_limit(&self, count: u32) -> usize {
        let requested = count as usize;
        if self.max_videos == 0 {
            requested
        } else {
            requested.min(self.max_videos)
        }
    }
}

/// Response cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the in-memory response cache (default: true).
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Entry time-to-live in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Maximum number of cached responses.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Create a test configuration: defaults plus a dummy credential and a
    /// small, fast-expiring cache.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.upstream.cookie = Some("test-session-cookie".to_string());
        config.cache.ttl_secs = 60;
        config.cache.max_entries = 8;
        config
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_cors_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://www.douyin.com/aweme/v1/web/aweme/post/".to_string()
}

fn default_share_base_url() -> String {
    "https://www.douyin.com/video/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_cache_max_entries() -> usize {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
            cors_enabled: default_cors_enabled(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            share_base_url: default_share_base_url(),
            cookie: None,
            timeout_secs: default_timeout_secs(),
            max_videos: 0,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}
