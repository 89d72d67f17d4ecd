//! The upstream listing client and its trait seam.

use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use reelay_core::config::UpstreamConfig;
use reqwest::Url;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT};
use serde_json::Value;
use std::time::Duration;

/// Fixed query parameters mimicking the platform's own web client. The
/// listing endpoint rejects requests that don't look like the PC webapp.
const WEB_CLIENT_PARAMS: &[(&str, &str)] = &[
    ("device_platform", "webapp"),
    ("aid", "6383"),
    ("channel", "channel_pc_web"),
    ("version_code", "170400"),
    ("version_name", "17.4.0"),
    ("cookie_enabled", "true"),
    ("platform", "PC"),
    ("downlink", "10"),
];

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Length of the response-body prefix kept on non-2xx statuses.
const BODY_PREFIX_CHARS: usize = 500;

/// A source of raw video-listing payloads.
///
/// The server holds `Arc<dyn VideoSource>` so tests can substitute a
/// scripted source and assert on call counts.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch one page of a user's videos as the raw upstream JSON body.
    async fn fetch_user_videos(
        &self,
        user_id: &str,
        max_cursor: i64,
        count: u32,
    ) -> FetchResult<Value>;
}

/// Reqwest-backed client for the platform's internal listing endpoint.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    /// Profile-page origin used to build the per-user referer.
    referer_origin: String,
    cookie: Option<String>,
}

impl UpstreamClient {
    /// Build a client from configuration. The request timeout is fixed at
    /// construction; a missing cookie is only an error at fetch time so the
    /// server can still start and report the condition.
    pub fn new(config: &UpstreamConfig) -> FetchResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        let host = base_url
            .host_str()
            .ok_or_else(|| FetchError::InvalidBaseUrl(config.base_url.clone()))?;
        let referer_origin = format!("{}://{}", base_url.scheme(), host);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            referer_origin,
            cookie: config.cookie.clone(),
        })
    }

    /// Construct the outbound request without sending it.
    fn build_request(
        &self,
        user_id: &str,
        max_cursor: i64,
        count: u32,
    ) -> FetchResult<reqwest::Request> {
        let cookie = self.cookie.as_deref().ok_or(FetchError::MissingCredential)?;

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in WEB_CLIENT_PARAMS {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("sec_user_id", user_id);
            pairs.append_pair("max_cursor", &max_cursor.to_string());
            pairs.append_pair("count", &count.to_string());
        }

        let referer = format!("{}/user/{user_id}", self.referer_origin);
        let request = self
            .http
            .get(url)
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(REFERER, referer)
            .header(COOKIE, cookie)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl VideoSource for UpstreamClient {
    async fn fetch_user_videos(
        &self,
        user_id: &str,
        max_cursor: i64,
        count: u32,
    ) -> FetchResult<Value> {
        let request = self.build_request(user_id, max_cursor, count)?;
        tracing::debug!(url = %request.url(), "fetching upstream listing");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let body_prefix: String = body.chars().take(BODY_PREFIX_CHARS).collect();
            tracing::warn!(status = %status, body = %body_prefix, "upstream request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body_prefix,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
