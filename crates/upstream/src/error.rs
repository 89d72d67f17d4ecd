//! Upstream fetch error types.

use thiserror::Error;

/// Errors from a single upstream listing fetch.
///
/// Exactly one attempt is made per call; retries are a caller concern.
/// The server never surfaces these to HTTP callers directly — every
/// variant is folded into a non-cacheable failure envelope.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No credential cookie configured. A configuration condition, not a
    /// network fault.
    #[error("upstream credential cookie is not configured")]
    MissingCredential,

    /// Configured base URL failed to parse.
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),

    /// Network-level failure: timeout, DNS, connection reset.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {status}")]
    Status {
        status: u16,
        /// First bytes of the response body, for log context.
        body_prefix: String,
    },

    /// Upstream answered 2xx but the body was not valid JSON.
    #[error("upstream response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
