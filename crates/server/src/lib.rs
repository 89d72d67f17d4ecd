//! HTTP proxy for a third-party video-listing API.
//!
//! This crate provides the HTTP surface:
//! - The video-listing route (cache lookup, upstream fetch, normalization)
//! - Health and credential-diagnostic routes
//! - The expiring in-memory response cache
//! - Prometheus metrics

pub mod cache;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use cache::{CacheKey, VideoCache};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
