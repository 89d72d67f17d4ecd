//! Core domain types and shared logic for the reelay video-listing proxy.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Application configuration (server, upstream, cache sections)
//! - The uniform response envelope and video summary model
//! - Normalization of raw upstream payloads into envelopes

pub mod config;
pub mod envelope;
pub mod normalize;

pub use config::{AppConfig, CacheConfig, ServerConfig, UpstreamConfig};
pub use envelope::{ResponseEnvelope, VideoStats, VideoSummary};
pub use normalize::normalize;

/// Default number of videos requested per page when the caller omits `count`.
pub const DEFAULT_PAGE_COUNT: u32 = 10;

/// Hard ceiling on `count` accepted from callers. The upstream endpoint
/// silently truncates anything larger, so reject early instead.
pub const MAX_PAGE_COUNT: u32 = 50;
