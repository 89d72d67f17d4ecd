//! The video-listing endpoint.

use crate::cache::CacheKey;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{
    CACHE_HITS, CACHE_MISSES, UPSTREAM_FAILURES, UPSTREAM_REQUESTS, VIDEOS_RETURNED,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use reelay_core::envelope::ResponseEnvelope;
use reelay_core::normalize::normalize;
use reelay_core::{DEFAULT_PAGE_COUNT, MAX_PAGE_COUNT};
use serde::Deserialize;

/// Query parameters for the listing route.
#[derive(Debug, Deserialize)]
pub struct ListVideosParams {
    /// Upstream pagination cursor. Opaque; 0 means the first page.
    #[serde(default)]
    pub max_cursor: i64,
    /// Requested page size.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    DEFAULT_PAGE_COUNT
}

/// GET /v1/videos/{user_id}
///
/// Every logical outcome — videos found, user has none, upstream refused —
/// is a 200 with an envelope; callers branch on `success`, not on the HTTP
/// status. Only successful envelopes enter the cache, so a transient
/// upstream failure never poisons later identical requests.
pub async fn list_user_videos(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListVideosParams>,
) -> ApiResult<Json<ResponseEnvelope>> {
    if params.count == 0 || params.count > MAX_PAGE_COUNT {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {MAX_PAGE_COUNT}"
        )));
    }

    let key = CacheKey {
        user_id: user_id.clone(),
        max_cursor: params.max_cursor,
        count: params.count,
    };

    if let Some(envelope) = state.cache.get(&key) {
        CACHE_HITS.inc();
        tracing::debug!(user_id = %user_id, cursor = params.max_cursor, "cache hit");
        return Ok(Json(envelope));
    }
    CACHE_MISSES.inc();

    UPSTREAM_REQUESTS.inc();
    let envelope = match state
        .source
        .fetch_user_videos(&user_id, params.max_cursor, params.count)
        .await
    {
        Ok(raw) => normalize(
            &raw,
            &state.config.upstream.share_base_url,
            state.config.upstream.video_limit(params.count),
        ),
        Err(e) => {
            UPSTREAM_FAILURES.inc();
            tracing::warn!(user_id = %user_id, error = %e, "upstream fetch failed");
            ResponseEnvelope::failure(e.to_string())
        }
    };

    if envelope.success {
        if let Some(videos) = &envelope.data {
            VIDEOS_RETURNED.inc_by(videos.len() as u64);
        }
        state.cache.put(key, envelope.clone());
    }

    Ok(Json(envelope))
}
