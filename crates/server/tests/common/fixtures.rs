//! Test fixtures for generating upstream listing payloads.

use serde_json::{Value, json};

/// A complete, well-formed listing entry.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub fn video_entry(id: &str) -> Value {
    json!({
        "aweme_id": id,
        "desc": format!("clip {id}"),
        "create_time": 1700000000,
        "author": { "nickname": "creator" },
        "statistics": { "digg_count": 100, "comment_count": 10, "share_count": 2 }
    })
}

/// An entry the normalizer must skip (no `aweme_id`).
#[allow(dead_code)]
pub fn malformed_entry() -> Value {
    json!({ "desc": "record without an id" })
}

/// A raw upstream payload wrapping `entries`.
#[allow(dead_code)]
pub fn listing_payload(entries: Vec<Value>) -> Value {
    json!({
        "status_code": 0,
        "aweme_list": entries,
        "max_cursor": 0,
        "has_more": 0
    })
}

/// A payload with `count` well-formed entries.
#[allow(dead_code)]
pub fn listing_with(count: usize) -> Value {
    listing_payload((0..count).map(|i| video_entry(&format!("700{i}"))).collect())
}
