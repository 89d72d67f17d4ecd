//! Normalization of raw upstream payloads into response envelopes.
//!
//! The upstream API is an external collaborator whose field names and
//! nesting can drift without notice. Every lookup here tolerates missing
//! keys with documented defaults, and a malformed record is dropped
//! individually instead of aborting the whole batch.

use crate::envelope::{ResponseEnvelope, VideoStats, VideoSummary};
use serde_json::Value;

/// Default title for videos the upstream returns without a caption.
pub const DEFAULT_TITLE: &str = "untitled";

/// Default author name when the author object or nickname is absent.
pub const DEFAULT_AUTHOR: &str = "unknown author";

/// Per-record extraction outcome. `Skipped` records are logged and dropped;
/// the batch continues.
enum Record {
    Extracted(VideoSummary),
    Skipped,
}

/// Turn a raw listing payload into an envelope, keeping at most `limit`
/// summaries.
///
/// An absent or empty `aweme_list` is a *successful* empty result, not a
/// failure: "user has no videos" is a valid state. `data` may contain fewer
/// entries than the upstream list if some records were malformed.
pub fn normalize(raw: &Value, share_base_url: &str, limit: usize) -> ResponseEnvelope {
    let list = match raw.get("aweme_list").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => return ResponseEnvelope::empty(),
    };

    let videos: Vec<VideoSummary> = list
        .iter()
        .take(limit)
        .filter_map(|entry| match extract_summary(entry, share_base_url) {
            Record::Extracted(summary) => Some(summary),
            Record::Skipped => {
                tracing::debug!(entry = %entry, "skipping malformed video record");
                None
            }
        })
        .collect();

    if videos.is_empty() {
        ResponseEnvelope::empty()
    } else {
        ResponseEnvelope::found(videos)
    }
}

/// Extract one summary from a listing entry.
///
/// A record is malformed when it is not an object, when `aweme_id` is
/// missing or not a string, or when a nested `author`/`statistics` field is
/// present but not an object. Absent nested objects are fine and fall back
/// to defaults.
fn extract_summary(entry: &Value, share_base_url: &str) -> Record {
    let Some(obj) = entry.as_object() else {
        return Record::Skipped;
    };

    let Some(video_id) = obj.get("aweme_id").and_then(Value::as_str) else {
        return Record::Skipped;
    };

    let author = match nested_object(obj, "author") {
        Ok(author) => author,
        Err(()) => return Record::Skipped,
    };
    let statistics = match nested_object(obj, "statistics") {
        Ok(statistics) => statistics,
        Err(()) => return Record::Skipped,
    };

    let title = obj
        .get("desc")
        .and_then(Value::as_str)
        .filter(|desc| !desc.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let author = author
        .and_then(|a| a.get("nickname"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_AUTHOR)
        .to_string();

    let statistics = VideoStats {
        likes: count_field(statistics, "digg_count"),
        comments: count_field(statistics, "comment_count"),
        shares: count_field(statistics, "share_count"),
    };

    Record::Extracted(VideoSummary {
        title,
        author,
        video_id: video_id.to_string(),
        video_link: format!("{share_base_url}{video_id}"),
        create_time: obj.get("create_time").and_then(Value::as_i64).unwrap_or(0),
        statistics,
    })
}

/// Look up a nested object field. `Ok(None)` when absent or null,
/// `Err(())` when present with a non-object shape.
fn nested_object<'a>(
    obj: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<&'a serde_json::Map<String, Value>>, ()> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(nested)) => Ok(Some(nested)),
        Some(_) => Err(()),
    }
}

fn count_field(obj: Option<&serde_json::Map<String, Value>>, key: &str) -> u64 {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}
