//! The uniform response envelope and the video summary model.

use serde::{Deserialize, Serialize};

/// Engagement counters for a single video.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    /// Like count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
    /// Share count.
    pub shares: u64,
}

/// One video, reduced to the fields callers actually consume.
///
/// Derived entirely from the upstream payload; a summary only lives for the
/// duration of one response (plus its stay in the cache).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Video caption. "untitled" when the upstream omits it.
    pub title: String,
    /// Author display name. "unknown author" when the upstream omits it.
    pub author: String,
    /// Upstream video identifier.
    pub video_id: String,
    /// User-facing share link, derived from the share base URL + video_id.
    pub video_link: String,
    /// Unix creation timestamp. 0 when the upstream omits it.
    pub create_time: i64,
    pub statistics: VideoStats,
}

/// Uniform wrapper returned on every logical outcome.
///
/// Callers branch on `success`, never on HTTP status: upstream failures
/// and empty listings both arrive as well-formed envelopes with a
/// human-readable `message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Option<Vec<VideoSummary>>,
}

impl ResponseEnvelope {
    /// Successful envelope wrapping `videos`, with a count summary message.
    pub fn found(videos: Vec<VideoSummary>) -> Self {
        Self {
            success: true,
            message: format!("found {} videos", videos.len()),
            data: Some(videos),
        }
    }

    /// Successful empty envelope. "User has no videos" is a valid state,
    /// distinct from a failed fetch.
    pub fn empty() -> Self {
        Self {
            success: true,
            message: "no videos found".to_string(),
            data: Some(Vec::new()),
        }
    }

    /// Failure envelope. Never cached.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
