//! Outbound client for the third-party video-listing API.
//!
//! This crate owns everything that touches the network on the upstream
//! side: request construction (fixed web-client query constants, browser
//! headers, credential cookie, per-user referer), the bounded-timeout call
//! itself, and the error taxonomy the server folds into failure envelopes.

pub mod client;
pub mod error;

pub use client::{UpstreamClient, VideoSource};
pub use error::{FetchError, FetchResult};
